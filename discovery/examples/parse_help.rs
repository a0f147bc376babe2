//! Parses one pre-captured help page and prints what was found.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p helptree-discovery --example parse_help
//! ```

use helptree_discovery::parser::parse_help_text;

fn main() {
    let help_text = r#"A fictional CLI tool for demonstration

Usage: mycli [OPTIONS] <COMMAND>

Commands:
  init     Initialize a new project
  build    Build the project
  help     Print this message or the help of the given subcommand(s)

Options:
  -c, --config <FILE>    Path to config file
  -m, --mode <MODE>
          Build mode

          Possible values:
          - debug:   Unoptimized, with debug assertions
          - release: Optimized
  -v, --verbose          Enable verbose output
  -h, --help             Print help
"#;

    let parsed = match parse_help_text("mycli", help_text) {
        Ok(parsed) => parsed,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    };

    println!("Command: {}", parsed.command);

    println!("\nFlags ({}):", parsed.flags.len());
    for flag in &parsed.flags {
        let aliases: Vec<&str> = flag.aliases().collect();
        let placeholder = flag.placeholder.as_deref().unwrap_or("");
        println!("  {} {placeholder}  {}", aliases.join(", "), flag.description);
        for choice in &flag.choices {
            println!("      {}: {}", choice.value, choice.description);
        }
    }

    println!("\nSubcommands ({}):", parsed.commands.len());
    for command in &parsed.commands {
        println!("  {}  {}", command.name, command.description);
    }

    println!("\nPositional args ({}):", parsed.positional.len());
    for arg in &parsed.positional {
        println!("  {}  {}", arg.name, arg.description);
    }
}
