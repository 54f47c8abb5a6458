//! respkv CLI Client
//!
//! Command-line interface for talking to a RESP server.

use clap::{Parser, Subcommand};
use respkv::{network, Command, Config, Value};
use tracing_subscriber::{fmt, EnvFilter};

/// respkv CLI
#[derive(Parser, Debug)]
#[command(name = "respkv-cli")]
#[command(about = "CLI for RESP key-value servers")]
#[command(version)]
struct Args {
    /// Server address
    #[arg(short, long, default_value = "127.0.0.1:6379")]
    server: String,

    /// Socket read/write timeout in milliseconds (0 = none)
    #[arg(short, long, default_value = "5000")]
    timeout_ms: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Ping the server
    Ping,

    /// Get a value by key
    Get {
        /// The key to get
        key: String,
    },

    /// Set a key-value pair
    Set {
        /// The key to set
        key: String,

        /// The value to set
        value: String,
    },

    /// Delete keys
    Del {
        /// The keys to delete
        #[arg(required = true)]
        keys: Vec<String>,
    },

    /// Increment an integer key
    Incr {
        key: String,
    },

    /// Send an arbitrary command and print the reply
    Raw {
        /// Verb followed by its arguments
        #[arg(required = true, num_args = 1..)]
        args: Vec<String>,
    },

    /// Run commands in one MULTI/EXEC transaction
    ///
    /// Commands are separated by ';', e.g. "SET a 1; INCR a; GET a"
    Multi {
        script: String,
    },
}

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,respkv=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        tracing::error!("{}", e);
        eprintln!("(error) {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> respkv::Result<()> {
    let config = Config::builder()
        .addr(&args.server)
        .read_timeout_ms(args.timeout_ms)
        .write_timeout_ms(args.timeout_ms)
        .build();

    let mut conn = network::connect(&config)?;

    match args.command {
        Commands::Ping => {
            let reply = Command::cmd("PING").build().query(&mut conn)?.as_object()?;
            println!("{}", render(&reply));
        }
        Commands::Get { key } => {
            let reply = Command::cmd("GET").arg(key).build().query(&mut conn)?.as_string()?;
            println!("{}", reply.as_deref().unwrap_or("(nil)"));
        }
        Commands::Set { key, value } => {
            let reply = Command::cmd("SET")
                .arg(key)
                .arg(value)
                .build()
                .query(&mut conn)?
                .as_string()?;
            println!("{}", reply.as_deref().unwrap_or("(nil)"));
        }
        Commands::Del { keys } => {
            let removed = Command::cmd("DEL").args(&keys).build().query(&mut conn)?.as_long()?;
            println!("(integer) {}", removed);
        }
        Commands::Incr { key } => {
            let value = Command::cmd("INCR").arg(key).build().query(&mut conn)?.as_long()?;
            println!("(integer) {}", value);
        }
        Commands::Raw { args } => {
            let reply = Command::cmd(args[0].clone())
                .args(&args[1..])
                .build()
                .query(&mut conn)?
                .as_object()?;
            println!("{}", render(&reply));
        }
        Commands::Multi { script } => {
            let commands = parse_script(&script);
            if commands.is_empty() {
                return Err(respkv::RespError::InvalidArgument(
                    "no commands in script".to_string(),
                ));
            }

            let mut tx = conn.transaction();
            let results: Vec<_> = commands
                .into_iter()
                .map(|command| command.queue(&mut tx).as_object())
                .collect();
            tx.execute()?;

            for (i, result) in results.iter().enumerate() {
                println!("{}) {}", i + 1, render(&result.get()?));
            }
        }
    }

    Ok(())
}

/// Split "CMD a b; CMD c" into commands
fn parse_script(script: &str) -> Vec<Command> {
    script
        .split(';')
        .filter_map(|part| {
            let mut words = part.split_whitespace();
            let verb = words.next()?;
            Some(Command::cmd(verb).args(words).build())
        })
        .collect()
}

/// Format a reply the way redis-cli does
fn render(value: &Value) -> String {
    match value {
        Value::SimpleString(s) => s.clone(),
        Value::BulkString(s) => format!("{:?}", s),
        Value::Integer(n) => format!("(integer) {}", n),
        Value::Error(err) => format!("(error) {}", err),
        Value::Null => "(nil)".to_string(),
        Value::Array(items) if items.is_empty() => "(empty array)".to_string(),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| format!("{}) {}", i + 1, render(item)))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}
