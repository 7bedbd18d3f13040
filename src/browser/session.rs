use fantoccini::{Client, ClientBuilder};
use url::Url;

use crate::browser::Navigator;
use crate::error::Error;

/// Common WebDriver addresses tried when the configured one is unreachable
const FALLBACK_WEBDRIVER_URLS: [&str; 4] = [
    "http://localhost:9515", // ChromeDriver default
    "http://localhost:4723", // Appium default
    "http://localhost:9222", // Chrome debug port default
    "http://127.0.0.1:4444",
];

/// A WebDriver-controlled browser showing the course
#[derive(Clone)]
pub struct BrowserSession {
    client: Client,
}

impl BrowserSession {
    /// Connect to `webdriver_url`, falling back to the usual local ports
    pub async fn connect(webdriver_url: &str) -> Result<Self, Error> {
        let first_error = match ClientBuilder::native().connect(webdriver_url).await {
            Ok(client) => {
                ::log::debug!("Connected to WebDriver at {}", webdriver_url);
                return Ok(Self { client });
            }
            Err(e) => {
                ::log::error!("Failed to connect to WebDriver at {}: {}", webdriver_url, e);
                e
            }
        };

        for url in FALLBACK_WEBDRIVER_URLS.iter() {
            if *url == webdriver_url {
                continue;
            }

            ::log::info!("Trying fallback WebDriver URL: {}", url);
            if let Ok(client) = ClientBuilder::native().connect(url).await {
                ::log::debug!("Connected to fallback WebDriver at {}", url);
                return Ok(Self { client });
            }
        }

        ::log::error!(
            "Make sure a WebDriver server is running or set the WEBDRIVER_URL environment variable"
        );
        Err(Error::Session(first_error))
    }

    /// Navigate the browser to `url`
    pub async fn goto(&self, url: &Url) -> Result<(), Error> {
        ::log::debug!("GOTO: {}", url);
        self.client.goto(url.as_str()).await?;
        Ok(())
    }

    /// Serialized DOM of the current page
    pub async fn source(&self) -> Result<String, Error> {
        let source = self.client.source().await.map_err(|e| {
            if e.to_string().contains("Unable to find session") {
                ::log::warn!("Lost WebDriver session while getting page source");
            }
            e
        })?;
        Ok(source)
    }

    pub async fn current_url(&self) -> Result<Url, Error> {
        Ok(self.client.current_url().await?)
    }

    /// End the WebDriver session
    pub async fn close(self) -> Result<(), Error> {
        self.client.close().await?;
        Ok(())
    }
}

impl Navigator for BrowserSession {
    async fn open(&mut self, url: &Url) -> Result<(), Error> {
        self.goto(url).await
    }
}
