// Build-Script: Wird vor dem Kompilieren ausgeführt
// Backt die Netzwerk-Konfiguration ein und konfiguriert den Linker

/// Environment-Variablen, die zur Compile-Zeit in den Code eingebacken werden
const BAKED_ENV_VARS: &[&str] = &[
    "WIFI_SSID",
    "WIFI_PASSWORD",
    "MQTT_BROKER",
    "MQTT_CLIENT_ID",
    "MQTT_TOPIC_LAMPS",
    "MQTT_TOPIC_EVENT",
];

fn main() {
    // Fehler ignorieren wenn .env nicht existiert (dann müssen ENV vars gesetzt sein)
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("⚠️  .env file nicht gefunden: {}", e);
        eprintln!("   Setze WIFI_* und MQTT_* als Environment-Variablen");
    }

    for name in BAKED_ENV_VARS {
        println!("cargo:rerun-if-env-changed={}", name);
        if let Ok(value) = std::env::var(name) {
            println!("cargo:rustc-env={}={}", name, value);
        }
    }
    println!("cargo:rerun-if-changed=.env");

    linker_hints();

    // defmt.x - Symbole für defmt's binäres Log-Format
    println!("cargo:rustc-link-arg=-Tdefmt.x");

    // linkall.x - ESP32 Memory-Layout, muss als LETZTES kommen
    println!("cargo:rustc-link-arg=-Tlinkall.x");
}

/// Zeigt Tipps bei Linker-Fehlern
///
/// Wird vom Linker als "--error-handling-script" mit Fehler-Typ und
/// Symbol-Name aufgerufen.
fn linker_hints() {
    let args: Vec<String> = std::env::args().collect();

    if let [_, kind, what, ..] = args.as_slice() {
        if kind != "undefined-symbol" {
            std::process::exit(1);
        }

        let hint = match what.as_str() {
            what if what.starts_with("_defmt_") => {
                Some("`defmt` not found - make sure `defmt.x` is added as a linker script")
            }
            "_stack_start" => Some("Is the linker script `linkall.x` missing?"),
            what if what.starts_with("esp_rtos_") => Some(
                "`esp-radio` has no scheduler enabled. Make sure you have initialized `esp-rtos`.",
            ),
            "free" | "malloc" | "calloc" | "realloc_internal" | "malloc_internal" => {
                Some("Did you forget the `esp-alloc` dependency?")
            }
            _ => None,
        };
        if let Some(hint) = hint {
            eprintln!();
            eprintln!("💡 {}", hint);
            eprintln!();
        }
        std::process::exit(0);
    }

    match std::env::current_exe() {
        Ok(exe) => println!(
            "cargo:rustc-link-arg=--error-handling-script={}",
            exe.display()
        ),
        Err(e) => eprintln!("⚠️  Linker-Hinweise deaktiviert: {}", e),
    }
}
