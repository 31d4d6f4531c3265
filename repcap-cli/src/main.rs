use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use repcap::{AliasRegistry, DEFAULT_CEILING, Regex, transform_debug, transform_with};

#[derive(Parser)]
#[command(name = "repcap")]
#[command(about = "Repcap - expand repeated regex groups so every repetition is captured")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the expanded form of a pattern
    Expand {
        /// The pattern to expand
        pattern: String,
        #[command(flatten)]
        options: ExpandOptions,
        /// Show the parsed tree as well
        #[arg(short, long)]
        debug: bool,
    },
    /// Match an expanded pattern against input and print its captures
    Captures {
        /// The pattern
        pattern: String,
        /// The input string
        input: String,
        #[command(flatten)]
        options: ExpandOptions,
        /// Keep slots of optional copies that did not match
        #[arg(short, long)]
        keep_empty: bool,
        /// Pick one capture per run of groups, as BEFORE,AFTER
        #[arg(short, long, value_parser = parse_skip)]
        skip: Option<(usize, usize)>,
    },
}

#[derive(Args)]
struct ExpandOptions {
    /// Upper bound used for `*` and `+`
    #[arg(short, long, default_value_t = DEFAULT_CEILING)]
    ceiling: usize,
    /// Register an alias as NAME=BODY (enables aliasing)
    #[arg(short, long = "alias", value_parser = parse_alias)]
    aliases: Vec<(String, String)>,
    /// Wrap expanded aliases in named groups
    #[arg(short, long)]
    named_groups: bool,
}

impl ExpandOptions {
    fn registry(&self) -> AliasRegistry {
        let mut registry = AliasRegistry::new();
        registry.set_aliasing(!self.aliases.is_empty());
        registry.set_named_alias_groups(self.named_groups);
        for (name, body) in &self.aliases {
            if let Err(e) = registry.register(name.as_str(), body.as_str()) {
                fail(e);
            }
        }
        registry
    }
}

fn parse_alias(arg: &str) -> Result<(String, String), String> {
    match arg.split_once('=') {
        Some((name, body)) => Ok((name.to_string(), body.to_string())),
        None => Err(format!("expected NAME=BODY, got `{}`", arg)),
    }
}

fn parse_skip(arg: &str) -> Result<(usize, usize), String> {
    let (before, after) = arg
        .split_once(',')
        .ok_or_else(|| format!("expected BEFORE,AFTER, got `{}`", arg))?;
    let before = before.trim().parse().map_err(|e| format!("{}", e))?;
    let after = after.trim().parse().map_err(|e| format!("{}", e))?;
    Ok((before, after))
}

fn fail(e: impl std::fmt::Display) -> ! {
    eprintln!("{} {}", "Error:".red().bold(), e);
    std::process::exit(1);
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Expand {
            pattern,
            options,
            debug,
        } => cmd_expand(&pattern, &options, debug),
        Commands::Captures {
            pattern,
            input,
            options,
            keep_empty,
            skip,
        } => cmd_captures(&pattern, &input, &options, keep_empty, skip),
    }
}

fn cmd_expand(pattern: &str, options: &ExpandOptions, debug: bool) {
    println!("{}", "Expanding pattern...".bold());
    println!("  Input:  {}", pattern.cyan());
    println!();

    let registry = options.registry();

    if debug {
        match transform_debug(pattern, &registry, options.ceiling) {
            Ok(result) => result.report(),
            Err(e) => fail(e),
        }
    } else {
        match transform_with(pattern, &registry, options.ceiling) {
            Ok(result) => {
                println!("{}", "Output:".bold());
                println!("  {}", result.green());
            }
            Err(e) => fail(e),
        }
    }
}

fn cmd_captures(
    pattern: &str,
    input: &str,
    options: &ExpandOptions,
    keep_empty: bool,
    skip: Option<(usize, usize)>,
) {
    let registry = options.registry();
    let regex = match Regex::with_registry(pattern, &registry, options.ceiling) {
        Ok(r) => r,
        Err(e) => fail(e),
    };

    println!("  Pattern:  {}", regex.source().cyan());
    println!("  Expanded: {}", regex.as_str().cyan());
    println!("  Input:    {}", input.yellow());
    println!();

    let caps = match regex.captures(input) {
        Ok(caps) => caps,
        Err(e) => fail(e),
    };

    let Some(full) = caps.full_match() else {
        println!("{}", "✗ No match".red());
        std::process::exit(1);
    };

    println!("{}", "✓ Match found!".green().bold());
    println!("  Match:    {}", full.green());
    println!();

    if let Some((before, after)) = skip {
        println!("{}", "Selected captures:".bold());
        for (i, text) in caps.skip(before, after).iter().enumerate() {
            println!("  [{}] {}", i + 1, text.green());
        }
        return;
    }

    println!("{}", "Captures:".bold());
    for (i, slot) in caps.filter(!keep_empty).unwrap_or_default().iter().enumerate() {
        match slot {
            Some(text) => println!("  [{}] {}", i + 1, text.green()),
            None => println!("  [{}] {}", i + 1, "(none)".dimmed()),
        }
    }
}
