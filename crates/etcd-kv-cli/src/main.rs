use anyhow::Context;
use clap::Parser;
use clap::Subcommand;
use etcd_kv_client::ChangeEvent;
use etcd_kv_client::Client;
use etcd_kv_client::ClientOptions;
use etcd_kv_client::DeleteQuery;
use etcd_kv_client::KeyValue;
use etcd_kv_client::RangeQuery;
use etcd_kv_client::WatchQuery;
use tracing::info;
use tracing::metadata::LevelFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[clap(name = "etcd-kv", about = "Read, write and watch keys in etcd")]
struct Options {
    #[clap(flatten)]
    client: ClientOptions,

    /// Filter logs using this string, rather than the `RUST_LOG` environment variable.
    #[clap(long, global = true)]
    log_filter: Option<String>,

    /// Don't print logs with colour.
    #[clap(long, global = true)]
    no_colour: bool,

    /// Print key-values and events as json lines.
    #[clap(long, global = true)]
    json: bool,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the value of a key, or of every key under a prefix.
    Get {
        key: String,
        #[clap(long)]
        prefix: bool,
    },
    /// Set a key to a value.
    Put { key: String, value: String },
    /// Delete a key, or every key under a prefix.
    Delete {
        key: String,
        #[clap(long)]
        prefix: bool,
    },
    /// Print changes to a key until interrupted or cancelled.
    Watch {
        key: String,
        #[clap(long)]
        prefix: bool,
        /// Include the previous value with each change.
        #[clap(long)]
        prev_kv: bool,
        /// Replay changes from this revision on.
        #[clap(long, default_value = "0")]
        start_revision: i64,
    },
}

fn print_kv(kv: &KeyValue, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string(kv)?);
    } else {
        println!("{}", String::from_utf8_lossy(&kv.key));
        println!("{}", String::from_utf8_lossy(&kv.value));
    }
    Ok(())
}

fn print_event(event: &ChangeEvent, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string(event)?);
    } else {
        println!("{:?}", event.kind);
        if let Some(previous) = &event.previous {
            print_kv(previous, false)?;
        }
        print_kv(&event.current, false)?;
    }
    Ok(())
}

async fn run(options: Options) -> anyhow::Result<()> {
    let client = Client::connect(&options.client)
        .await
        .context("Failed to connect")?;
    let json = options.json;

    match options.command {
        Command::Get { key, prefix } => {
            let query = if prefix {
                RangeQuery::prefix(key)
            } else {
                RangeQuery::new(key)
            };
            let result = client.range(&query).await?;
            for kv in &result.kvs {
                print_kv(kv, json)?;
            }
        }
        Command::Put { key, value } => {
            let header = client.put(&key, &value).await?;
            info!(revision = header.revision, "Put {}", key);
            println!("OK");
        }
        Command::Delete { key, prefix } => {
            let query = if prefix {
                DeleteQuery::prefix(key)
            } else {
                DeleteQuery::new(key)
            };
            let result = client.delete_range(&query).await?;
            println!("{}", result.deleted);
        }
        Command::Watch {
            key,
            prefix,
            prev_kv,
            start_revision,
        } => {
            let mut query = if prefix {
                WatchQuery::prefix(key)
            } else {
                WatchQuery::new(key)
            }
            .with_start_revision(start_revision);
            if prev_kv {
                query = query.with_prev_kv();
            }
            let mut watch = client.watch_with(query).await?;
            loop {
                tokio::select! {
                    batch = watch.message() => {
                        match batch? {
                            Some(batch) => {
                                for event in &batch {
                                    print_event(event, json)?;
                                }
                            }
                            None => {
                                info!(termination = ?watch.termination(), "Watch ended");
                                break;
                            }
                        }
                    }
                    _ = tokio::signal::ctrl_c() => {
                        info!("Closing watch");
                        watch.close();
                        break;
                    }
                }
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let options = Options::parse();

    let log_filter = if let Some(log_filter) = &options.log_filter {
        EnvFilter::from(log_filter)
    } else {
        EnvFilter::builder()
            .with_default_directive(LevelFilter::INFO.into())
            .from_env_lossy()
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_ansi(!options.no_colour).with_writer(std::io::stderr))
        .with(log_filter)
        .init();

    run(options).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_watch_flags() {
        let options = Options::parse_from([
            "etcd-kv",
            "--endpoints",
            "http://10.0.0.1:2379",
            "watch",
            "dir/",
            "--prefix",
            "--prev-kv",
            "--start-revision",
            "4",
            "--json",
        ]);
        assert!(options.json);
        assert_eq!(options.client.endpoints.len(), 1);
        match options.command {
            Command::Watch {
                key,
                prefix,
                prev_kv,
                start_revision,
            } => {
                assert_eq!(key, "dir/");
                assert!(prefix && prev_kv);
                assert_eq!(start_revision, 4);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn command_definition_is_consistent() {
        use clap::CommandFactory;
        Options::command().debug_assert();
    }
}
