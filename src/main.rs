//! xraylink - Generate Xray share links or list client emails from config.json

use std::path::PathBuf;
use std::process::ExitCode;

use tracing::{debug, warn, Level};
use tracing_subscriber::FmtSubscriber;

use xraylink::config::Config;
use xraylink::error::Result;
use xraylink::link::encoder_for;
use xraylink::{locator, qr};

fn main() -> ExitCode {
    let args = Args::parse();

    if args.version {
        print_version();
        return ExitCode::SUCCESS;
    }

    // Logging goes to stderr; stdout carries only the result
    let log_level = std::env::var("RUST_LOG")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(Level::WARN);

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let Some(config_file) = &args.config_file else {
        eprintln!("Error: the config_file argument is required.");
        eprintln!("Run with --help for usage.");
        std::process::exit(1);
    };

    if args.qrcode && !qr::AVAILABLE {
        warn!("--qrcode was requested, but QR support is not compiled in");
        warn!("rebuild with the 'qrcode' feature to use it; falling back to text output");
    }

    let config = Config::load(config_file)?;
    debug!("loaded {} inbounds from {}", config.inbounds.len(), config_file.display());

    if args.list_emails {
        let emails = locator::list_emails(&config);
        if emails.is_empty() {
            eprintln!("No client emails found in the configuration.");
            return Ok(());
        }
        println!("Found client emails:");
        for email in &emails {
            println!("- {email}");
        }
        return Ok(());
    }

    let (Some(server_address), Some(client_email)) = (&args.server_address, &args.client_email)
    else {
        eprintln!(
            "Error: server_address and client_email are required when --listemails is not used."
        );
        std::process::exit(1);
    };

    let ctx = locator::find_by_email(&config, client_email)?;
    let url = encoder_for(ctx.protocol)?.encode(&ctx, server_address)?;

    if args.qrcode && qr::AVAILABLE {
        match qr::render(&url) {
            Ok(rendering) => println!("{rendering}"),
            Err(err) => {
                // Rendering failed with the capability present: still hand the
                // user a usable link, but exit nonzero.
                println!("\nHere is the URL string instead:");
                println!("{url}");
                return Err(err);
            }
        }
    } else {
        println!("{url}");
    }

    Ok(())
}

/// Command line arguments
struct Args {
    config_file: Option<PathBuf>,
    server_address: Option<String>,
    client_email: Option<String>,
    list_emails: bool,
    qrcode: bool,
    version: bool,
}

impl Args {
    fn parse() -> Self {
        let argv: Vec<String> = std::env::args().collect();
        let mut list_emails = false;
        let mut qrcode = false;
        let mut version = false;
        let mut positionals = Vec::new();

        for arg in argv.iter().skip(1) {
            match arg.as_str() {
                "--listemails" => list_emails = true,
                "-qrcode" | "--qrcode" => qrcode = true,
                "-v" | "--version" => version = true,
                "-h" | "--help" => {
                    print_help();
                    std::process::exit(0);
                }
                other if !other.starts_with('-') => positionals.push(other.to_string()),
                other => {
                    eprintln!("Unknown option: {}", other);
                    std::process::exit(1);
                }
            }
        }

        let mut positionals = positionals.into_iter();
        Self {
            config_file: positionals.next().map(PathBuf::from),
            server_address: positionals.next(),
            client_email: positionals.next(),
            list_emails,
            qrcode,
            version,
        }
    }
}

fn print_help() {
    let qr_note = if qr::AVAILABLE {
        ""
    } else {
        " (DISABLED: built without the 'qrcode' feature)"
    };
    println!(
        r#"xraylink - Generate Xray share links or list client emails from config.json

USAGE:
    xraylink <config_file> <server_address> <client_email> [OPTIONS]
    xraylink <config_file> --listemails

ARGS:
    config_file       Path to your server's config.json file
    server_address    Your server's public domain or IP
    client_email      The 'email' of the client to generate a link for

OPTIONS:
    --listemails      List all client emails found in the config and exit
    -qrcode, --qrcode Print the share link as a terminal QR code{}
    -v, --version     Print version information
    -h, --help        Print help information

EXAMPLES:
    xraylink config.json --listemails
    xraylink config.json vpn.example.com alice
    xraylink config.json 203.0.113.7 alice --qrcode
"#,
        qr_note
    );
}

fn print_version() {
    println!("xraylink v{}", env!("CARGO_PKG_VERSION"));
    println!("Generate share links (vless/vmess/trojan) from Xray server configs");
}
