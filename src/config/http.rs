use super::{
    record::{CashInRecord, CashOutJuridicalRecord, CashOutNaturalRecord},
    ConfigSource, Error,
};
use crate::commission::{CashInConfig, CashOutJuridicalConfig, CashOutNaturalConfig, ConfigKind};
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{info, warn};

const CASH_IN_PATH: &str = "/config/cash-in";
const CASH_OUT_NATURAL_PATH: &str = "/config/cash-out/natural";
const CASH_OUT_JURIDICAL_PATH: &str = "/config/cash-out/juridical";

/// Reads the fee configurations from the commission API, one GET request per
/// configuration.
pub struct HttpConfigSource {
    client: Client,
    base_url: String,
}

impl HttpConfigSource {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn get<T: DeserializeOwned>(&self, kind: ConfigKind, path: &str) -> Result<T, Error> {
        let url = self.url(path);
        info!(%url, %kind, "fetching fee configuration");

        self.client
            .get(&url)
            .send()
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.json::<T>())
            .map_err(|err| {
                warn!(%url, error = %err, "failed to fetch fee configuration");
                Error::Fetch {
                    kind,
                    reason: err.to_string(),
                }
            })
    }
}

impl ConfigSource for HttpConfigSource {
    fn cash_in(&self) -> Result<Option<CashInConfig>, Error> {
        let record: CashInRecord = self.get(ConfigKind::CashIn, CASH_IN_PATH)?;
        Ok(Some(record.into()))
    }

    fn cash_out_natural(&self) -> Result<Option<CashOutNaturalConfig>, Error> {
        let record: CashOutNaturalRecord =
            self.get(ConfigKind::CashOutNatural, CASH_OUT_NATURAL_PATH)?;
        Ok(Some(record.into()))
    }

    fn cash_out_juridical(&self) -> Result<Option<CashOutJuridicalConfig>, Error> {
        let record: CashOutJuridicalRecord =
            self.get(ConfigKind::CashOutJuridical, CASH_OUT_JURIDICAL_PATH)?;
        Ok(Some(record.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::HttpConfigSource;
    use crate::commission::{CashInConfig, ConfigKind};
    use crate::config::{ConfigSource, Error};
    use rust_decimal_macros::dec;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::time::Duration;

    // Serves `response` to every connection on a local port.
    fn serve(response: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let address = listener.local_addr().unwrap();

        std::thread::spawn(move || {
            for stream in listener.incoming() {
                let mut stream = match stream {
                    Ok(stream) => stream,
                    Err(_) => return,
                };
                let mut request = [0; 4096];
                let _ = stream.read(&mut request);
                let _ = stream.write_all(response.as_bytes());
            }
        });

        format!("http://{}", address)
    }

    fn source(base_url: &str) -> HttpConfigSource {
        HttpConfigSource::new(base_url, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_url() {
        for base_url in vec!["http://localhost:8080", "http://localhost:8080/"] {
            assert_eq!(
                "http://localhost:8080/config/cash-out/natural",
                source(base_url).url(super::CASH_OUT_NATURAL_PATH)
            );
        }
    }

    #[test]
    fn test_fetch() {
        let base_url = serve(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 53\r\nConnection: close\r\n\r\n\
             {\"percents\":0.03,\"max\":{\"amount\":5,\"currency\":\"EUR\"}}",
        );

        assert_eq!(
            Some(CashInConfig::new(dec!(0.03), dec!(5), "EUR")),
            source(&base_url).cash_in().unwrap()
        );
    }

    #[test]
    // Server errors and unexpected payloads both name the configuration.
    fn test_fetch_failure_names_the_configuration() {
        for (response, reason_contains) in vec![
            (
                "HTTP/1.1 500 Internal Server Error\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
                "500",
            ),
            (
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 2\r\nConnection: close\r\n\r\n{}",
                "decoding",
            ),
        ] {
            let base_url = serve(response);

            match source(&base_url).cash_in() {
                Err(Error::Fetch { kind, reason }) => {
                    assert_eq!(ConfigKind::CashIn, kind);
                    assert!(reason.contains(reason_contains), "{}", reason);
                }
                other => panic!("unexpected result: {:?}", other),
            }
        }
    }
}
