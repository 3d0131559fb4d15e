use anyhow::Result;
use rapport_application::ChatAssistantService;

pub async fn run(service: &ChatAssistantService, message: &str, client_id: Option<&str>) -> Result<()> {
    let reply = service.ask(message, client_id).await?;
    println!("{}", reply);
    Ok(())
}
