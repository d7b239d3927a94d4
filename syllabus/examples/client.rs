use base64::Engine;
use reqwest::Client;
use serde_json::json;
use tokio;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let pdf_path = std::env::args()
        .nth(1)
        .ok_or("usage: cargo run --example client -- <syllabus.pdf>")?;
    let base_url = std::env::var("SERVER_URL").unwrap_or_else(|_| "http://127.0.0.1:3000".to_string());
    let client = Client::new();

    println!("🔍 Testing Syllabus Parser Client");

    // Health check
    println!("\n📋 Health Check:");
    let health_response = client.get(&base_url).send().await?;
    println!("Status: {}", health_response.status());
    println!("Response: {}", health_response.text().await?);

    // Parse
    println!("\n📄 Parsing {}:", pdf_path);
    let pdf = tokio::fs::read(&pdf_path).await?;
    let payload = json!({
        "file": base64::engine::general_purpose::STANDARD.encode(&pdf)
    });

    let parse_response = client
        .post(&format!("{}/parse-syllabus", base_url))
        .json(&payload)
        .send()
        .await?;

    println!("Status: {}", parse_response.status());
    let parse_json: serde_json::Value = parse_response.json().await?;
    println!("Response: {}", serde_json::to_string_pretty(&parse_json)?);

    println!("\n✅ Client test completed!");
    Ok(())
}
