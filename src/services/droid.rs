use anyhow::Context;
use thirtyfour::{ChromiumLikeCapabilities, DesiredCapabilities, WebDriver};

use crate::configuration::WebDriverSettings;

pub struct Droid {
    pub driver: WebDriver,
}

impl Droid {
    pub async fn new(settings: &WebDriverSettings) -> anyhow::Result<Self> {
        let mut caps = DesiredCapabilities::chrome();

        for arg in chrome_arguments(settings) {
            caps.add_arg(&arg)?;
        }
        caps.add_experimental_option("excludeSwitches", vec!["enable-automation"])?;
        caps.add_experimental_option("useAutomationExtension", false)?;

        // chromedriver: http://localhost:9515
        // selenium hub: http://chrome:4444/wd/hub
        let driver = WebDriver::new(settings.url.as_str(), caps)
            .await
            .with_context(|| format!("Failed to start a browser session at {}", settings.url))?;

        if let Err(e) = driver.maximize_window().await {
            log::warn!("Could not maximize the browser window: {:?}", e);
        }

        Ok(Droid { driver })
    }

    pub async fn quit(self) {
        match self.driver.quit().await {
            Ok(_) => log::info!("Browser session closed"),
            Err(e) => log::error!("Failed to close the browser session: {:?}", e),
        }
    }
}

fn chrome_arguments(settings: &WebDriverSettings) -> Vec<String> {
    let mut args: Vec<String> = [
        "--start-maximized",
        "--disable-notifications",
        "--disable-infobars",
        "--lang=en-US",
        "--disable-blink-features=AutomationControlled",
    ]
    .iter()
    .map(|arg| arg.to_string())
    .collect();

    if settings.headless {
        args.push("--headless=new".to_string());
        args.push("--window-size=1920,1080".to_string());
    }

    let user_agent = match (&settings.user_agent, settings.randomize_user_agent) {
        (Some(user_agent), _) => Some(user_agent.clone()),
        (None, true) => Some(fake_user_agent::get_chrome_rua().to_string()),
        (None, false) => None,
    };
    if let Some(user_agent) = user_agent {
        args.push(format!("--user-agent={}", user_agent));
    }

    args
}
