//! Interactive console client for the Minimail API.
//!
//! Talks to a running server over HTTP. The base URL comes from the first
//! argument or the `MINIMAIL_URL` environment variable.

use std::io::{self, Write};

use serde_json::Value;

use minimail::auth::validation::validate_email;

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080";
const SEPARATOR: &str = "--------------------------------------------------";

struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    fn new(base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            token: None,
        }
    }

    async fn register(&self, email: &str, password: &str) -> Result<Value, reqwest::Error> {
        self.http
            .post(format!("{}/api/register", self.base_url))
            .form(&[("email", email), ("password", password)])
            .send()
            .await?
            .json()
            .await
    }

    /// Log in and remember the session token on success.
    async fn login(&mut self, email: &str, password: &str) -> Result<bool, reqwest::Error> {
        let body: Value = self
            .http
            .post(format!("{}/api/login", self.base_url))
            .form(&[("email", email), ("password", password)])
            .send()
            .await?
            .json()
            .await?;

        if body["success"].as_bool() == Some(true) {
            self.token = body["token"].as_str().map(str::to_string);
        }
        Ok(self.token.is_some())
    }

    async fn send_message(
        &self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<Value, reqwest::Error> {
        let mut req = self
            .http
            .post(format!("{}/api/send", self.base_url))
            .form(&[("to", to), ("subject", subject), ("body", body)]);
        if let Some(token) = &self.token {
            req = req.header("X-Auth-Token", token);
        }
        req.send().await?.json().await
    }

    async fn list(&self, path: &str) -> Result<Vec<Value>, reqwest::Error> {
        let mut req = self.http.get(format!("{}{}", self.base_url, path));
        if let Some(token) = &self.token {
            req = req.header("X-Auth-Token", token);
        }
        req.send().await?.json().await
    }

    async fn suggest(&self, subject: &str) -> Result<String, reqwest::Error> {
        let body: Value = self
            .http
            .get(format!("{}/api/ml", self.base_url))
            .query(&[("subject", subject)])
            .send()
            .await?
            .json()
            .await?;
        Ok(body["body"].as_str().unwrap_or_default().to_string())
    }
}

/// Print a label and read one line, without the trailing newline.
fn prompt(label: &str) -> Option<String> {
    print!("{label}");
    io::stdout().flush().ok()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line).ok()?;
    Some(line.trim_end_matches(['\r', '\n']).to_string())
}

async fn register_flow(client: &ApiClient) {
    let Some(email) = prompt("Email: ") else { return };
    let Some(password) = prompt("Password: ") else {
        return;
    };

    match client.register(&email, &password).await {
        Ok(body) if body["success"].as_bool() == Some(true) => {
            println!("User registered successfully!");
        }
        Ok(body) => {
            let message = body["message"].as_str().unwrap_or("unknown error");
            println!("Registration failed: {message}");
        }
        Err(e) => println!("Request failed: {e}"),
    }
}

async fn send_flow(client: &ApiClient) {
    let Some(to) = prompt("Receiver: ") else { return };

    if validate_email(&to).is_err() {
        println!("Invalid recipient email format. Send cancelled.");
        return;
    }

    let Some(subject) = prompt("Subject: ") else {
        return;
    };

    let Some(answer) = prompt("Suggest a body for this subject? (y/n): ") else {
        return;
    };
    let body = if matches!(answer.trim().to_lowercase().as_str(), "y" | "yes") {
        match client.suggest(&subject).await {
            Ok(suggested) if !suggested.is_empty() => {
                println!("Suggested body:\n{suggested}");
                let Some(accept) = prompt("Accept suggested body? (y/n): ") else {
                    return;
                };
                if matches!(accept.trim().to_lowercase().as_str(), "y" | "yes") {
                    suggested
                } else {
                    let Some(body) = prompt("Body: ") else { return };
                    body
                }
            }
            Ok(_) => {
                println!("No suggestion available. Enter body manually.");
                let Some(body) = prompt("Body: ") else { return };
                body
            }
            Err(e) => {
                println!("Suggestion request failed: {e}");
                let Some(body) = prompt("Body: ") else { return };
                body
            }
        }
    } else {
        let Some(body) = prompt("Body: ") else { return };
        body
    };

    match client.send_message(&to, &subject, &body).await {
        Ok(resp) if resp["success"].as_bool() == Some(true) => println!("Mail sent."),
        Ok(resp) => {
            let message = resp["message"].as_str().unwrap_or("send rejected");
            println!("Send failed: {message}");
        }
        Err(e) => println!("Request failed: {e}"),
    }
}

async fn inbox_flow(client: &ApiClient) {
    match client.list("/api/inbox").await {
        Ok(entries) => {
            println!("\nINBOX:");
            println!("{SEPARATOR}");
            if entries.is_empty() {
                println!("No emails found.");
                return;
            }
            for entry in entries {
                println!("From   : {}", entry["from"].as_str().unwrap_or(""));
                println!("Subject: {}", entry["subject"].as_str().unwrap_or(""));
                println!("Message: {}", entry["body"].as_str().unwrap_or(""));
                println!("Time   : {}", entry["time"].as_str().unwrap_or(""));
                println!("{SEPARATOR}");
            }
        }
        Err(e) => println!("Request failed: {e}"),
    }
}

async fn sent_flow(client: &ApiClient) {
    match client.list("/api/sent").await {
        Ok(entries) => {
            println!("\nSENT MAILS:");
            println!("{SEPARATOR}");
            if entries.is_empty() {
                println!("No emails found.");
                return;
            }
            for entry in entries {
                println!("To     : {}", entry["to"].as_str().unwrap_or(""));
                println!("Subject: {}", entry["subject"].as_str().unwrap_or(""));
                println!("Message: {}", entry["body"].as_str().unwrap_or(""));
                println!("Time   : {}", entry["time"].as_str().unwrap_or(""));
                println!("{SEPARATOR}");
            }
        }
        Err(e) => println!("Request failed: {e}"),
    }
}

async fn menu_loop(client: &ApiClient) {
    loop {
        println!();
        println!("--- MENU ---");
        println!("1. Send Email");
        println!("2. View Inbox");
        println!("3. View Sent Emails");
        println!("4. Logout");

        let Some(choice) = prompt("> ") else { break };

        match choice.trim() {
            "1" => send_flow(client).await,
            "2" => inbox_flow(client).await,
            "3" => sent_flow(client).await,
            "4" => {
                println!("Logged out successfully!");
                break;
            }
            _ => println!("Invalid option. Try again."),
        }
    }
}

#[tokio::main]
async fn main() {
    let base_url = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("MINIMAIL_URL").ok())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    let mut client = ApiClient::new(base_url);

    println!("1. Register");
    println!("2. Login");

    let Some(option) = prompt("> ") else { return };

    match option.trim() {
        "1" => register_flow(&client).await,
        "2" => {
            let Some(email) = prompt("Email: ") else { return };
            let Some(password) = prompt("Password: ") else {
                return;
            };

            match client.login(&email, &password).await {
                Ok(true) => {
                    println!("Login successful!");
                    menu_loop(&client).await;
                }
                Ok(false) => println!("Invalid login credentials!"),
                Err(e) => println!("Request failed: {e}"),
            }
        }
        _ => println!("Invalid option!"),
    }
}
