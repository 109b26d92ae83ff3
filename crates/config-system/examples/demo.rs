//! Configuration system demonstration
//! Prints the built-in presets and the default page configuration as YAML

use page_fx_config::{ConfigFormat, ConfigSerializer, ConfigValidator, PresetManager};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Page FX Configuration Demo\n");

    let presets = PresetManager::new();
    println!("Diagram presets:");
    for preset in presets.get_all_presets() {
        println!("  {} -> {}", preset.name, preset.tooltip);
    }

    let config = presets.config_with(&["compaction", "hybrid_layers"])?;
    ConfigValidator::validate(&config)?;

    println!("\n{}", ConfigSerializer::serialize_string(&config, ConfigFormat::Yaml)?);
    Ok(())
}
