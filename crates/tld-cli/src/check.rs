use std::path::Path;

use regex::Regex;

use tld_compiler::parse_suffix_list;

use crate::output;

/// Verify that the pattern in `pattern_path` fully matches every suffix
/// listed in `input_path`, in both literal and decoded form.
pub fn run_check(input_path: &str, pattern_path: &str) -> Result<(), String> {
    let text = output::read_text(Path::new(input_path))?;
    let list = parse_suffix_list(&text).map_err(|e| format!("Failed to parse '{}': {}", input_path, e))?;

    let pattern = output::read_text(Path::new(pattern_path))?;
    let pattern = pattern.trim_end();
    let re = Regex::new(&format!("^(?:{})$", pattern))
        .map_err(|e| format!("Invalid pattern in '{}': {}", pattern_path, e))?;

    let missing = find_unmatched(&re, list.literal.iter().chain(list.decoded.iter()));

    println!("Checked '{}' against '{}'", pattern_path, input_path);
    println!("  Suffixes: {}", list.len());
    println!("  Missing:  {}", missing.len());

    if missing.is_empty() {
        return Ok(());
    }
    for suffix in missing.iter().take(20) {
        println!("    {}", suffix);
    }
    if missing.len() > 20 {
        println!("    ... and {} more", missing.len() - 20);
    }
    Err(format!("{} suffix(es) not matched by the pattern", missing.len()))
}

fn find_unmatched<'a, I>(re: &Regex, suffixes: I) -> Vec<&'a str>
where
    I: Iterator<Item = &'a String>,
{
    suffixes
        .filter(|suffix| !re.is_match(suffix))
        .map(String::as_str)
        .collect()
}
