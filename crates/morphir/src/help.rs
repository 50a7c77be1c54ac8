//! Banner display for the Morphir CLI.

use owo_colors::{OwoColorize, XtermColors};

// "morph" in brand blue (#00A3E0), "ir" in brand orange (#F26522)
const BLUE: u8 = 33;
const ORANGE: u8 = 208;

const ART: [(&str, &str, &str); 4] = [
    ("  ", "_ __ ___   ___  _ __ _ __ | |__", "(_)_ __"),
    (" ", "| '_ ` _ \\ / _ \\| '__| '_ \\| '_ \\", "| | '__|"),
    (" ", "| | | | | | (_) | |  | |_) | | | ", "| | |"),
    (" ", "|_| |_| |_|\\___/|_|  | .__/|_| |_", "|_|_|"),
];

/// Print the Morphir banner to stderr, keeping stdout for program output.
pub fn print_banner() {
    let blue = XtermColors::from(BLUE);
    let orange = XtermColors::from(ORANGE);

    eprintln!();
    for (indent, morph, ir) in ART {
        eprintln!("{indent}{}{}", morph.color(blue), ir.color(orange));
    }
    eprintln!("                     {}", "|_|".color(blue));
    eprintln!("  v{} (built {})", env!("CARGO_PKG_VERSION"), env!("BUILD_DATE"));
    eprintln!();
}

/// The banner accompanies help and version output, never machine output.
pub fn should_show_banner(args: &[String]) -> bool {
    if args.iter().any(|a| a == "--json") {
        return false;
    }
    args.len() == 1
        || args.iter().any(|a| a == "--help" || a == "-h")
        || args.iter().any(|a| a == "--version" || a == "-V")
        || (args.len() == 2 && args[1] == "help")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_should_show_banner() {
        assert!(should_show_banner(&args(&["morphir"])));
        assert!(should_show_banner(&args(&["morphir", "--help"])));
        assert!(should_show_banner(&args(&["morphir", "ir", "-h"])));
        assert!(should_show_banner(&args(&["morphir", "help"])));
        assert!(!should_show_banner(&args(&["morphir", "name", "fooBar"])));
        assert!(!should_show_banner(&args(&["morphir", "--json", "--help"])));
    }
}
