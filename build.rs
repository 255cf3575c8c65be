use std::fs;

const CONFIG_PATH: &str = "src/default_config.toml";

// Every key `Config::compiled_default` relies on, by section. `[typst] font` is optional.
const REQUIRED_KEYS: &[(&str, &[&str])] = &[
    ("preview", &["x_limit", "instagram_limit", "ellipsis", "strip_chars"]),
    ("html", &["group_bullets", "spacer_class"]),
    ("typst", &["bold_table_header"]),
    ("page", &["numbers"]),
    ("repurpose", &["source_limit"]),
];

fn main() {
    println!("cargo:rerun-if-changed={}", CONFIG_PATH);

    let content = fs::read_to_string(CONFIG_PATH).expect("Failed to read default_config.toml");
    let table = match content.parse::<toml::Table>() {
        Ok(table) => table,
        Err(e) => panic!("Invalid default_config.toml: {}", e),
    };

    for (section, keys) in REQUIRED_KEYS {
        let Some(section_table) = table.get(*section).and_then(toml::Value::as_table) else {
            panic!("default_config.toml is missing the [{}] section", section);
        };
        for key in *keys {
            if !section_table.contains_key(*key) {
                panic!("default_config.toml is missing [{}] {}", section, key);
            }
        }
    }
}
