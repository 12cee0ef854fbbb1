use std::env;
use std::net::Ipv4Addr;
use std::process::ExitCode;
use anyhow::Result;
use gumdrop::Options;
use log::debug;
use thiserror::Error;
use tokio::signal;
use portknock::config::{parse, Direct, Load, Profile};
use portknock::{Bind, Knock, KnockError, Knocker};

const NAME: &str = env!("CARGO_PKG_NAME");

#[derive(Debug, Options)]
pub struct Args {
    #[options(help = "print help message")]
    help:     bool,
    #[options(short = "f", meta = "PFILE", help = "file with port-knocking profiles")]
    file:     Option<String>,
    #[options(short = "l", meta = "PROFILE", help = "profile to run")]
    profile:  Option<String>,
    #[options(short = "a", meta = "IPADDR", help = "IP address to knock (IPv4 dotted-quad)")]
    addr:     Option<String>,
    #[options(short = "i", meta = "INTERVAL", help = "interval between knocks (milliseconds)")]
    interval: Option<String>,
    #[options(short = "p", meta = "PORT:PROTO", help = "ports to knock (with protocol)")]
    port:     Vec<String>,
    #[options(short = "b", meta = "IPADDR", help = "local address to knock from")]
    bind:     Option<String>,
    #[options(free)]
    rest:     Vec<String>,
}

#[derive(Debug, Error)]
#[error("invalid argument combination")]
struct Usage;

#[derive(Debug, Error)]
#[error("interrupted")]
struct Interrupted;

impl Args {
    fn loader<S: AsRef<str>>(&self, argv: &[S]) -> Option<Box<dyn Load>> {
        let Self { file, profile, addr, interval, port, rest, .. } = self;

        let loader: Box<dyn Load> = match (file, profile, addr, interval) {
            (Some(file), Some(name), None, None) if port.is_empty() && rest.is_empty() => {
                Box::new(Profile::new(file, name))
            }
            (None, None, Some(addr), Some(interval)) if !port.is_empty() => {
                Box::new(Direct {
                    addr:     addr.clone(),
                    interval: interval.clone(),
                    ports:    ports(argv)?,
                })
            }
            _ => return None,
        };

        Some(loader)
    }
}

/// Port tokens in command-line order: every `-p` value and the free
/// arguments that follow a `-p`. A free argument before the first `-p`
/// is rejected.
fn ports<S: AsRef<str>>(argv: &[S]) -> Option<Vec<String>> {
    let mut ports = Vec::new();
    let mut seen  = false;
    let mut argv  = argv.iter().map(|s| AsRef::<str>::as_ref(s));

    while let Some(arg) = argv.next() {
        match arg {
            "--" => {
                for free in argv.by_ref() {
                    if !seen {
                        return None;
                    }
                    ports.push(free.to_owned());
                }
            }
            "-p" | "--port" => {
                seen = true;
                ports.extend(argv.next().map(str::to_owned));
            }
            "-h" | "--help" => {}
            _ if arg.starts_with("--port=") => {
                seen = true;
                ports.push(arg["--port=".len()..].to_owned());
            }
            _ if arg.starts_with("--") => {
                if !arg.contains('=') {
                    argv.next();
                }
            }
            _ if arg.starts_with("-p") => {
                seen = true;
                ports.push(arg[2..].to_owned());
            }
            _ if arg.starts_with('-') && arg.len() > 1 => {
                if arg.len() == 2 {
                    argv.next();
                }
            }
            _ if seen => ports.push(arg.to_owned()),
            _         => return None,
        }
    }

    Some(ports)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    env_logger::init();

    let argv = env::args().skip(1).collect::<Vec<_>>();
    let args = match Args::parse_args_default(&argv) {
        Ok(args) => args,
        Err(e)   => return fail(e.into()),
    };

    if args.help_requested() {
        print_usage();
        return ExitCode::SUCCESS;
    }

    match run(args, &argv).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => fail(e),
    }
}

async fn run(args: Args, argv: &[String]) -> Result<()> {
    let mut bind = Bind::default();
    if let Some(addr) = &args.bind {
        bind.set(parse::addr(addr)?);
    }

    let loader   = args.loader(argv).ok_or(Usage)?;
    let sequence = loader.load()?;

    debug!("{:?}", sequence);

    let knocker = Knocker::new(&bind);
    let report  = |addr: Ipv4Addr, knock: &Knock| {
        println!("Knocking on port {} {} at {}", knock.port(), knock.proto(), addr);
    };

    tokio::select! {
        result = knocker.knock(&sequence, &report) => Ok(result?),
        result = signal::ctrl_c() => {
            result?;
            Err(Interrupted.into())
        }
    }
}

fn fail(e: anyhow::Error) -> ExitCode {
    if e.is::<Usage>() {
        print_usage();
    } else {
        eprintln!("{}: error: {}", NAME, e);
    }
    ExitCode::from(status(&e))
}

fn status(e: &anyhow::Error) -> u8 {
    if e.is::<KnockError>() {
        2
    } else if e.is::<Interrupted>() {
        130
    } else {
        1
    }
}

fn print_usage() {
    println!("usage: {} [-h] (-f PFILE -l PROFILE | -a IPADDR -i INTERVAL -p PORT:PROTO [PORT:PROTO ...]) [-b IPADDR]", NAME);
    println!();
    println!("TCP/UDP port-knocker, with profile file support.");
    println!();
    println!("{}", Args::usage());
}

#[cfg(test)]
mod test {
    use super::*;

    fn loader(argv: &[&str]) -> Option<Box<dyn Load>> {
        Args::parse_args_default(argv).unwrap().loader(argv)
    }

    fn knocks(argv: &[&str]) -> Vec<Knock> {
        loader(argv).unwrap().load().unwrap().knocks
    }

    #[test]
    fn direct_arguments() {
        let list = knocks(&["-a", "1.2.3.4", "-i", "500", "-p", "111:TCP", "222:UDP", "333:tcp"]);
        assert_eq!(list, vec![Knock::TCP(111), Knock::UDP(222), Knock::TCP(333)]);
    }

    #[test]
    fn repeated_port_option() {
        let twice = knocks(&["-a", "1.2.3.4", "-i", "5", "-p", "1:TCP", "-p", "2:UDP"]);
        assert_eq!(twice, vec![Knock::TCP(1), Knock::UDP(2)]);

        let mixed = knocks(&["-p", "1:TCP", "2:UDP", "-a", "1.2.3.4", "-p", "3:TCP", "-i", "5", "4:UDP"]);
        assert_eq!(mixed, vec![Knock::TCP(1), Knock::UDP(2), Knock::TCP(3), Knock::UDP(4)]);
    }

    #[test]
    fn inline_port_values() {
        let list = knocks(&["--addr=1.2.3.4", "-i5", "--port=1:TCP", "2:UDP", "-p3:TCP"]);
        assert_eq!(list, vec![Knock::TCP(1), Knock::UDP(2), Knock::TCP(3)]);
    }

    #[test]
    fn ports_before_option_rejected() {
        assert!(loader(&["-a", "1.2.3.4", "-i", "5", "1:TCP", "-p", "2:UDP", "3:TCP"]).is_none());
        assert!(loader(&["-a", "1.2.3.4", "-i", "5", "-p", "1:TCP", "--", "2:UDP"]).is_some());
        assert!(loader(&["-a", "1.2.3.4", "-i", "5", "--", "1:TCP"]).is_none());
    }

    #[test]
    fn profile_arguments() {
        assert!(loader(&["-f", "knock.ini", "-l", "home"]).is_some());
    }

    #[test]
    fn exclusive_sources() {
        assert!(loader(&["-f", "knock.ini"]).is_none());
        assert!(loader(&["-l", "home"]).is_none());
        assert!(loader(&["-f", "knock.ini", "-l", "home", "-a", "1.2.3.4"]).is_none());
        assert!(loader(&["-f", "knock.ini", "-l", "home", "-p", "1:TCP"]).is_none());
        assert!(loader(&["-f", "knock.ini", "-l", "home", "1:TCP"]).is_none());
        assert!(loader(&["-a", "1.2.3.4", "-i", "500"]).is_none());
        assert!(loader(&["-a", "1.2.3.4", "-p", "1:TCP"]).is_none());
        assert!(loader(&["-a", "1.2.3.4", "-i", "500", "1:TCP"]).is_none());
        assert!(loader(&[]).is_none());
    }

    #[test]
    fn exit_status() {
        assert_eq!(status(&Usage.into()), 1);
        assert_eq!(status(&Interrupted.into()), 130);

        let err = KnockError::socket(Knock::UDP(1), std::io::ErrorKind::Other.into());
        assert_eq!(status(&err.into()), 2);

        let err = parse::addr("1.2.3").unwrap_err();
        assert_eq!(status(&err.into()), 1);
    }
}
