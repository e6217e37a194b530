use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
  let path = std::env::args().nth(1).unwrap_or_else(|| "/".to_string());

  let page = match sportsee_dashboard::run(&path).await {
    Ok(page) => page,
    Err(e) => {
      eprintln!("Failed to start dashboard: {}", e);
      return ExitCode::FAILURE;
    }
  };

  match serde_json::to_string_pretty(&page) {
    Ok(json) => {
      println!("{}", json);
      ExitCode::SUCCESS
    }
    Err(e) => {
      eprintln!("Failed to serialize page: {}", e);
      ExitCode::FAILURE
    }
  }
}
