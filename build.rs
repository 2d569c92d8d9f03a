use std::env;

fn main() {
    // include_str! does not always track the schema on its own
    println!("cargo:rerun-if-changed=schemas/action.schema.json");

    // Man pages are produced by the hidden generate-man command; only
    // packaging builds need to notice CLI changes
    if env::var("PROFILE").unwrap_or_default() == "release" || env::var("GENERATE_MAN").is_ok() {
        println!("cargo:rerun-if-changed=src/cli/mod.rs");
    }
}
