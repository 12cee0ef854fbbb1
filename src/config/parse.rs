use std::convert::TryFrom;
use std::net::Ipv4Addr;
use std::str::FromStr;
use std::time::Duration;
use crate::Knock;
use super::error::ConfigError;

pub fn addr(s: &str) -> Result<Ipv4Addr, ConfigError> {
    s.trim().parse().map_err(|_| ConfigError::Address(s.to_owned()))
}

/// Parses an interval in milliseconds.
pub fn interval(s: &str) -> Result<Duration, ConfigError> {
    let ms = s.trim().parse::<f64>().map_err(|_| {
        ConfigError::Interval(s.to_owned())
    })?;

    if !ms.is_finite() {
        return Err(ConfigError::Interval(s.to_owned()));
    } else if ms <= 0.0 {
        return Err(ConfigError::NonPositive);
    }

    Duration::try_from_secs_f64(ms / 1000.0).map_err(|_| {
        ConfigError::Interval(s.to_owned())
    })
}

pub fn knocks<'a, I: IntoIterator<Item = &'a str>>(tokens: I) -> Result<Vec<Knock>, ConfigError> {
    let knocks = tokens.into_iter().map(str::parse).collect::<Result<Vec<Knock>, _>>()?;
    match knocks.is_empty() {
        true  => Err(ConfigError::Empty),
        false => Ok(knocks),
    }
}

impl FromStr for Knock {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::Token(s.to_owned());

        let (port, proto) = s.trim().split_once(':').ok_or_else(invalid)?;
        let port = port.parse::<u32>().map_err(|_| invalid())?;

        // port 0 is valid, but not something a firewall can watch
        let port = match u16::try_from(port) {
            Ok(port) if port > 0 => port,
            _                    => return Err(ConfigError::Port),
        };

        match proto.to_uppercase().as_str() {
            "TCP" => Ok(Knock::TCP(port)),
            "UDP" => Ok(Knock::UDP(port)),
            _     => Err(ConfigError::Protocol),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn dotted_quad() {
        assert_eq!(addr("10.0.0.1").unwrap(), Ipv4Addr::new(10, 0, 0, 1));
        assert!(matches!(addr("10.0.0"),    Err(ConfigError::Address(_))));
        assert!(matches!(addr("10.0.0.256"), Err(ConfigError::Address(_))));
        assert!(matches!(addr("example"),   Err(ConfigError::Address(_))));
        assert!(matches!(addr("::1"),       Err(ConfigError::Address(_))));
    }

    #[test]
    fn interval_in_millis() {
        assert_eq!(interval("500").unwrap(), Duration::from_millis(500));
        assert_eq!(interval("250").unwrap(), Duration::from_millis(250));
        assert_eq!(interval(" 1000 ").unwrap(), Duration::from_secs(1));
        assert!(matches!(interval("0"),    Err(ConfigError::NonPositive)));
        assert!(matches!(interval("-10"),  Err(ConfigError::NonPositive)));
        assert!(matches!(interval("fast"), Err(ConfigError::Interval(_))));
        assert!(matches!(interval("inf"),  Err(ConfigError::Interval(_))));
        assert!(matches!(interval("NaN"),  Err(ConfigError::Interval(_))));
        assert!(matches!(interval("1e300"), Err(ConfigError::Interval(_))));
    }

    #[test]
    fn knock_tokens() {
        assert_eq!("111:TCP".parse::<Knock>().unwrap(), Knock::TCP(111));
        assert_eq!("222:udp".parse::<Knock>().unwrap(), Knock::UDP(222));
        assert_eq!("65535:Tcp".parse::<Knock>().unwrap(), Knock::TCP(65535));
        assert_eq!("1:UDP".parse::<Knock>().unwrap(), Knock::UDP(1));
    }

    #[test]
    fn knock_token_errors() {
        assert!(matches!("0:TCP".parse::<Knock>(),     Err(ConfigError::Port)));
        assert!(matches!("65536:TCP".parse::<Knock>(), Err(ConfigError::Port)));
        assert!(matches!("70000:TCP".parse::<Knock>(), Err(ConfigError::Port)));
        assert!(matches!("80:ICMP".parse::<Knock>(),   Err(ConfigError::Protocol)));
        assert!(matches!("80:TCP:x".parse::<Knock>(),  Err(ConfigError::Protocol)));
        assert!(matches!("80".parse::<Knock>(),        Err(ConfigError::Token(_))));
        assert!(matches!("http:TCP".parse::<Knock>(),  Err(ConfigError::Token(_))));
        assert!(matches!("-1:TCP".parse::<Knock>(),    Err(ConfigError::Token(_))));
    }

    #[test]
    fn knock_list_keeps_order() {
        let list = knocks(vec!["333:UDP", "111:TCP", "222:TCP"]).unwrap();
        assert_eq!(list, vec![Knock::UDP(333), Knock::TCP(111), Knock::TCP(222)]);
        assert!(matches!(knocks(Vec::new()), Err(ConfigError::Empty)));
        assert!(matches!(knocks(vec!["1:TCP", "bad"]), Err(ConfigError::Token(_))));
    }
}
