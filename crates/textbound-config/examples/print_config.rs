/// Example program to print the loaded configuration
///
/// Run with: cargo run -p textbound-config --example print_config

fn main() {
    // Load configuration from textbound.toml
    let config = textbound_config::TextboundConfig::load();

    println!("=== textbound Configuration ===\n");

    println!("Locale Settings:");
    println!("  Name: {:?}", config.locale.name);
    println!();

    println!("Segmentation Settings:");
    println!("  Boundary: {}", config.segmentation.boundary);
    println!("  Mask: {:?}", config.segmentation.mask);
    println!("  Full Select: {}", config.segmentation.full_select);
    println!("  Merge CJK Runs: {}", config.segmentation.merge_cjk_runs);
    println!();

    println!("Logging Settings:");
    println!("  Filter: {:?}", config.logging.filter);
    println!();

    match toml::to_string_pretty(&config) {
        Ok(toml_str) => {
            println!("=== Serialized Configuration ===");
            println!("{}", toml_str);
        }
        Err(e) => {
            eprintln!("Failed to serialize config: {}", e);
        }
    }
}
