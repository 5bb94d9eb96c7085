//! Quick-start example for the sanity-query client.
//!
//! Run with:
//!   SANITY_PROJECT_ID=abc123 cargo run --example quickstart
//!
//! Set `RUST_LOG=sanity_query=debug` to see the outgoing requests.

use sanity_query::{ClientBuilder, SanityError};
use serde::Deserialize;
use serde_json::json;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Deserialize)]
struct Post {
    title: String,
    #[serde(default)]
    slug: Option<String>,
}

#[tokio::main]
async fn main() -> sanity_query::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // -----------------------------------------------------------------------
    // 1. Create a client (reads SANITY_PROJECT_ID from environment)
    // -----------------------------------------------------------------------
    let client = ClientBuilder::new().dataset("production").build()?;

    println!("CDN endpoint:    {}", client.cdn_base_url());
    println!("Direct endpoint: {}", client.base_url());
    println!();

    // -----------------------------------------------------------------------
    // 2. Raw query with parameters
    // -----------------------------------------------------------------------
    let params = json!({ "type": "post" });
    let result = client
        .execute_query("count(*[_type == $type])", Some(&params))
        .await?;

    println!("Post count: {:?}", result.result);
    if let Some(ms) = result.elapsed_ms {
        println!("Took {ms}ms");
    }
    println!();

    // -----------------------------------------------------------------------
    // 3. Typed result
    // -----------------------------------------------------------------------
    let posts: Vec<Post> = client
        .fetch(
            "*[_type == 'post'][0...5]{title, 'slug': slug.current}",
            None,
        )
        .await?;

    for post in &posts {
        println!("  {} ({})", post.title, post.slug.as_deref().unwrap_or("-"));
    }
    println!();

    // -----------------------------------------------------------------------
    // 4. Handling a malformed query
    // -----------------------------------------------------------------------
    match client.execute_query("*[_type == ", None).await {
        Err(SanityError::RemoteQuery { error }) => println!("Query rejected: {error}"),
        Err(e @ SanityError::QueryFailed { .. }) => println!("Query rejected: {e}"),
        Err(e) => return Err(e),
        Ok(result) => println!("Unexpectedly succeeded: {:?}", result.result),
    }

    Ok(())
}
