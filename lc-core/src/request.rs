//! Anfragen der Web-Oberfläche
//!
//! Der Browser schickt flache Nachrichten mit optionalen Feldern. Hier wird
//! daraus ein [`LampCommand`], unabhängig vom JSON-Parser der Firmware.

use core::fmt;

use rgb::RGB8;

use crate::types::{Hsv, LampAddress, LampCommand};

/// Art der Anfrage (`"type"` im JSON)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum RequestKind {
    Learn,
    Clear,
    AddLamp,
    SetColour,
    TurnOn,
    TurnOff,
}

/// Unvollständige oder ungültige Anfrage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestError {
    MissingLamp,
    MissingColour,
    InvalidAddress,
}

impl RequestError {
    pub fn as_str(self) -> &'static str {
        match self {
            RequestError::MissingLamp => "missing field: lamp",
            RequestError::MissingColour => "missing field: rgb or hsv",
            RequestError::InvalidAddress => "address must be 18 hex digits",
        }
    }
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for RequestError {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{=str}", self.as_str())
    }
}

/// Felder einer Anfrage, wie sie vom Browser kommen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LampRequest<'a> {
    pub kind: RequestKind,
    pub lamp: Option<u8>,
    pub rgb: Option<RGB8>,
    pub hsv: Option<Hsv>,
    /// 18 Hex-Ziffern, nur für `AddLamp`
    pub address: Option<&'a str>,
}

enum Colour {
    Rgb(RGB8),
    Hsv(Hsv),
}

impl<'a> LampRequest<'a> {
    pub fn new(kind: RequestKind) -> Self {
        Self {
            kind,
            lamp: None,
            rgb: None,
            hsv: None,
            address: None,
        }
    }

    pub fn with_lamp(mut self, lamp: u8) -> Self {
        self.lamp = Some(lamp);
        self
    }

    pub fn with_rgb(mut self, rgb: RGB8) -> Self {
        self.rgb = Some(rgb);
        self
    }

    pub fn with_hsv(mut self, hsv: Hsv) -> Self {
        self.hsv = Some(hsv);
        self
    }

    pub fn with_address(mut self, address: &'a str) -> Self {
        self.address = Some(address);
        self
    }

    /// Übersetzt die Anfrage in ein Kommando für den Lampen-Task
    ///
    /// Sind `hsv` und `rgb` gesetzt, gilt `hsv`.
    pub fn to_command(&self) -> Result<LampCommand, RequestError> {
        match self.kind {
            RequestKind::Learn => Ok(LampCommand::Learn),
            RequestKind::Clear => Ok(LampCommand::Clear),
            RequestKind::AddLamp => {
                let address: LampAddress = self
                    .address
                    .ok_or(RequestError::InvalidAddress)?
                    .parse()
                    .map_err(|_| RequestError::InvalidAddress)?;
                Ok(LampCommand::AddLamp { address })
            }
            RequestKind::SetColour => {
                let index = self.lamp()?;
                Ok(match self.colour()? {
                    Colour::Rgb(colour) => LampCommand::SetColourRgb { index, colour },
                    Colour::Hsv(colour) => LampCommand::SetColourHsv { index, colour },
                })
            }
            RequestKind::TurnOn => {
                let index = self.lamp()?;
                Ok(match self.colour()? {
                    Colour::Rgb(colour) => LampCommand::TurnOnRgb { index, colour },
                    Colour::Hsv(colour) => LampCommand::TurnOnHsv { index, colour },
                })
            }
            RequestKind::TurnOff => Ok(LampCommand::TurnOff {
                index: self.lamp()?,
            }),
        }
    }

    fn lamp(&self) -> Result<u8, RequestError> {
        self.lamp.ok_or(RequestError::MissingLamp)
    }

    fn colour(&self) -> Result<Colour, RequestError> {
        match (self.hsv, self.rgb) {
            (Some(hsv), _) => Ok(Colour::Hsv(hsv)),
            (None, Some(rgb)) => Ok(Colour::Rgb(rgb)),
            (None, None) => Err(RequestError::MissingColour),
        }
    }
}
