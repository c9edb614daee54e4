use reqwest::Client;
use trip_planner::config::{BackendSettings, ServerSettings, Settings, TelemetrySettings};
use trip_planner::startup::Application;

pub struct TestApp {
    pub address: String,
    pub port: u16,
    /// Keeps the planner cookie between requests, like a browser tab.
    pub client: Client,
}

impl TestApp {
    pub async fn spawn(backend_url: &str) -> Self {
        let settings = Settings {
            server: ServerSettings {
                host: "127.0.0.1".to_string(),
                port: 0, // Random port
                session_idle_minutes: 60,
            },
            backend: BackendSettings {
                url: backend_url.to_string(),
                timeout_seconds: Some(5),
            },
            telemetry: TelemetrySettings::default(),
        };

        let app = Application::build(settings)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        let client = Client::builder()
            .cookie_store(true)
            .build()
            .expect("Failed to build client");

        // Wait for the server to be ready by polling the health endpoint
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            client,
        }
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(format!("{}{}", self.address, path))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> reqwest::Response {
        self.client
            .post(format!("{}{}", self.address, path))
            .header("HX-Request", "true")
            .form(form)
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Walk the form to a complete US/Texas/Austin selection.
    pub async fn fill_austin_trip(&self) {
        self.get("/").await;
        self.post_form("/planner/country", &[("country", "US")]).await;
        self.post_form("/planner/state", &[("state", "TX")]).await;
        self.post_form("/planner/city", &[("city", "Austin")]).await;
        let response = self
            .post_form(
                "/planner/dates",
                &[("start", "2024-06-01"), ("end", "2024-06-03")],
            )
            .await;
        assert_eq!(response.status().as_u16(), 204);
    }
}
