use clap::Parser;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "weekly_hours", about = "Weekly clock-in/clock-out tracker served over HTTP")]
pub struct Config {
    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Address to bind
    #[arg(long, env = "BIND_ADDR", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub bind: IpAddr,

    /// Key-value storage file holding the week
    #[arg(long, env = "APP_DATA_PATH", default_value = "data/storage.json")]
    pub data_path: PathBuf,
}

impl Config {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let config = Config::try_parse_from([
            "weekly_hours",
            "--port",
            "9001",
            "--bind",
            "127.0.0.1",
            "--data-path",
            "/tmp/week.json",
        ])
        .unwrap();
        assert_eq!(config.addr(), "127.0.0.1:9001".parse().unwrap());
        assert_eq!(config.data_path, PathBuf::from("/tmp/week.json"));
    }
}
