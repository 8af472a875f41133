//! McpSession against an in-process fake MCP server.
//!
//! The fake speaks newline-delimited JSON-RPC over a `tokio::io::duplex`
//! pipe and answers `initialize`, `tools/list` and `tools/call`.

use serde_json::{Value, json};
use std::time::Duration;
use tavily_domain::{SearchRequest, parse_provider_payload};
use tavily_infrastructure::mcp::{McpError, McpSession, search_arguments};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, DuplexStream};
use tokio::sync::mpsc;

const RESULTS_TEXT: &str = "Detailed Results:\n\n\
    Title: Async IO in Python\n\
    URL: https://realpython.com/async-io-python/\n\
    Content: A complete walkthrough.\n\n\
    Title: asyncio docs\n\
    URL: https://docs.python.org/3/library/asyncio.html\n\
    Content: Asynchronous I/O.\n";

async fn fake_server(
    stream: DuplexStream,
    tools: Vec<String>,
    reply: Value,
    calls: mpsc::UnboundedSender<Value>,
) {
    let (read, mut write) = tokio::io::split(stream);
    let mut lines = BufReader::new(read).lines();

    while let Ok(Some(line)) = lines.next_line().await {
        let Ok(message) = serde_json::from_str::<Value>(&line) else {
            continue;
        };
        // notifications carry no id and get no answer
        let Some(id) = message.get("id").cloned() else {
            continue;
        };

        let result = match message["method"].as_str().unwrap_or_default() {
            "initialize" => json!({
                "protocolVersion": message["params"]["protocolVersion"],
                "capabilities": {"tools": {}},
                "serverInfo": {"name": "fake-tavily", "version": "0.0.1"}
            }),
            "tools/list" => json!({
                "tools": tools
                    .iter()
                    .map(|name| json!({
                        "name": name,
                        "description": "fake tool",
                        "inputSchema": {"type": "object", "properties": {}}
                    }))
                    .collect::<Vec<_>>()
            }),
            "tools/call" => {
                let _ = calls.send(message["params"].clone());
                reply.clone()
            }
            _ => json!({}),
        };

        let mut frame = json!({"jsonrpc": "2.0", "id": id, "result": result}).to_string();
        frame.push('\n');
        if write.write_all(frame.as_bytes()).await.is_err() {
            break;
        }
        let _ = write.flush().await;
    }
}

async fn connect(
    tools: &[&str],
    reply: Value,
) -> (Result<McpSession, McpError>, mpsc::UnboundedReceiver<Value>) {
    let (client, server) = tokio::io::duplex(64 * 1024);
    let (tx, rx) = mpsc::unbounded_channel();
    let tools = tools.iter().map(|t| t.to_string()).collect();
    tokio::spawn(fake_server(server, tools, reply, tx));

    let (read, write) = tokio::io::split(client);
    (McpSession::connect(read, write, "tavily-search").await, rx)
}

fn text_reply(text: &str, is_error: bool) -> Value {
    json!({"content": [{"type": "text", "text": text}], "isError": is_error})
}

#[tokio::test]
async fn test_search_round_trip() {
    let (session, mut calls) = connect(
        &["tavily-extract", "tavily-search"],
        text_reply(RESULTS_TEXT, false),
    )
    .await;
    let session = session.unwrap();
    assert_eq!(session.tool_name(), "tavily-search");

    let request = SearchRequest::new("Python async programming")
        .unwrap()
        .with_domains(["github.com"]);
    let payload = session
        .call(search_arguments(&request).unwrap())
        .await
        .unwrap();
    session.close().await;

    let sent = calls.recv().await.unwrap();
    assert_eq!(sent["name"], "tavily-search");
    assert_eq!(sent["arguments"]["query"], "Python async programming");
    assert_eq!(sent["arguments"]["max_results"], 5);
    assert_eq!(sent["arguments"]["search_depth"], "basic");
    assert_eq!(sent["arguments"]["include_domains"], json!(["github.com"]));

    let output = parse_provider_payload(&request.query, &payload).unwrap();
    assert_eq!(output.total_results, 2);
    assert_eq!(output.results[1].title, "asyncio docs");
}

#[tokio::test]
async fn test_missing_search_tool() {
    let (session, mut calls) = connect(&["tavily-extract", "tavily-crawl"], json!({})).await;

    match session {
        Err(McpError::ToolNotFound { pattern, available }) => {
            assert_eq!(pattern, "tavily-search");
            assert!(available.contains("tavily-extract"));
            assert!(available.contains("tavily-crawl"));
        }
        Err(other) => panic!("unexpected error: {}", other),
        Ok(_) => panic!("session should not connect without a search tool"),
    }

    // the client hung up, so the server loop ended without a tools/call
    let closed = tokio::time::timeout(Duration::from_secs(5), calls.recv()).await;
    assert!(matches!(closed, Ok(None)));
}

#[tokio::test]
async fn test_error_result_is_flagged() {
    let (session, _calls) =
        connect(&["tavily-search"], text_reply("Invalid API key", true)).await;
    let session = session.unwrap();

    let request = SearchRequest::new("q").unwrap();
    let payload = session
        .call(search_arguments(&request).unwrap())
        .await
        .unwrap();
    session.close().await;

    assert!(payload.is_error);
    assert!(parse_provider_payload("q", &payload).is_err());
}

#[tokio::test]
async fn test_structured_content_is_preferred() {
    let reply = json!({
        "content": [{"type": "text", "text": RESULTS_TEXT}],
        "structuredContent": {
            "results": [{"title": "Only", "url": "https://only.dev", "content": "c", "score": 0.77}]
        }
    });
    let (session, _calls) = connect(&["tavily-search"], reply).await;
    let session = session.unwrap();

    let request = SearchRequest::new("q").unwrap();
    let payload = session
        .call(search_arguments(&request).unwrap())
        .await
        .unwrap();
    session.close().await;

    let output = parse_provider_payload("q", &payload).unwrap();
    assert_eq!(output.total_results, 1);
    assert_eq!(output.results[0].title, "Only");
    assert_eq!(output.results[0].score, 0.77);
}
