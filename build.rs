extern crate string_cache_codegen;

use std::env;
use std::path::Path;

fn main() {
    let out_dir = env::var("OUT_DIR").unwrap();

    string_cache_codegen::AtomType::new("css_property::CssProperty", "css_property!")
        .atoms(&["color", "text-align", "float", "width", "height"])
        .write_to_file(&Path::new(&out_dir).join("css_property.rs"))
        .unwrap();
}
