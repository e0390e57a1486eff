//! Interactive demo client
//!
//! Sends REGISTER, INVITE and BYE requests to a running `minisip` server and
//! prints every response it gets back.
//!
//! ```text
//! cargo run -p minisip-uas --example sip_client -- --server 127.0.0.1:5060 --user alice
//! ```

use std::io::Write;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::UdpSocket;
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "sip_client")]
#[command(about = "Sample SIP client")]
struct Args {
    /// SIP server address
    #[arg(short, long, default_value = "127.0.0.1:5060")]
    server: SocketAddr,

    /// SIP username
    #[arg(short, long, default_value = "user1")]
    user: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let socket = UdpSocket::bind("0.0.0.0:0").await.context("UDP bind error")?;
    socket
        .connect(args.server)
        .await
        .context("UDP connection error")?;
    let socket = Arc::new(socket);
    let local = socket.local_addr()?;

    println!("SIP client started: {}", args.user);
    println!("Commands: register, invite, bye, exit");

    let receiver = socket.clone();
    tokio::spawn(async move {
        let mut buffer = vec![0u8; 65535];
        loop {
            match receiver.recv(&mut buffer).await {
                Ok(n) => println!("\nReceived response:\n{}", String::from_utf8_lossy(&buffer[..n])),
                Err(e) => eprintln!("Response reading error: {}", e),
            }
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut last_call_id: Option<String> = None;
    loop {
        prompt("> ");
        let Some(command) = lines.next_line().await? else {
            break;
        };

        let request = match command.trim() {
            "exit" => break,
            "register" => register(&args.user, local),
            "invite" => {
                prompt("Username to call: ");
                let Some(callee) = lines.next_line().await? else {
                    break;
                };
                let call_id = new_id();
                last_call_id = Some(call_id.clone());
                invite(&args.user, callee.trim(), &call_id, local)
            }
            "bye" => {
                let call_id = last_call_id.take().unwrap_or_else(new_id);
                bye(&args.user, &call_id, local)
            }
            _ => {
                println!("Unknown command. Enter register, invite, bye, or exit.");
                continue;
            }
        };

        match socket.send(request.as_bytes()).await {
            Ok(_) => println!("{} sent", request.split(' ').next().unwrap_or_default()),
            Err(e) => eprintln!("Message sending error: {}", e),
        }
    }

    Ok(())
}

fn prompt(text: &str) {
    print!("{}", text);
    let _ = std::io::stdout().flush();
}

fn new_id() -> String {
    Uuid::new_v4().simple().to_string()
}

fn short_id() -> String {
    new_id()[..8].to_string()
}

fn register(user: &str, local: SocketAddr) -> String {
    format!(
        "REGISTER sip:{user}@localhost SIP/2.0\r\n\
         Via: SIP/2.0/UDP {local};branch=z9hG4bK{branch}\r\n\
         From: <sip:{user}@localhost>;tag={tag}\r\n\
         To: <sip:{user}@localhost>\r\n\
         Call-ID: {call_id}\r\n\
         CSeq: 1 REGISTER\r\n\
         Contact: <sip:{user}@{local}>\r\n\
         Max-Forwards: 70\r\n\
         User-Agent: minisip-demo-client\r\n\
         Expires: 3600\r\n\
         Content-Length: 0\r\n\r\n",
        branch = short_id(),
        tag = short_id(),
        call_id = new_id(),
    )
}

fn invite(caller: &str, callee: &str, call_id: &str, local: SocketAddr) -> String {
    let ip = local.ip();
    let sdp = format!(
        "v=0\r\n\
         o={caller} 123456 654321 IN IP4 {ip}\r\n\
         s=SIP Call\r\n\
         c=IN IP4 {ip}\r\n\
         t=0 0\r\n\
         m=audio 49170 RTP/AVP 0\r\n\
         a=rtpmap:0 PCMU/8000\r\n"
    );

    format!(
        "INVITE sip:{callee}@localhost SIP/2.0\r\n\
         Via: SIP/2.0/UDP {local};branch=z9hG4bK{branch}\r\n\
         From: <sip:{caller}@localhost>;tag={tag}\r\n\
         To: <sip:{callee}@localhost>\r\n\
         Call-ID: {call_id}\r\n\
         CSeq: 1 INVITE\r\n\
         Contact: <sip:{caller}@{local}>\r\n\
         Content-Type: application/sdp\r\n\
         Content-Length: {len}\r\n\r\n{sdp}",
        branch = short_id(),
        tag = short_id(),
        len = sdp.len(),
    )
}

fn bye(user: &str, call_id: &str, local: SocketAddr) -> String {
    format!(
        "BYE sip:server@localhost SIP/2.0\r\n\
         Via: SIP/2.0/UDP {local};branch=z9hG4bK{branch}\r\n\
         From: <sip:{user}@localhost>;tag={tag}\r\n\
         To: <sip:server@localhost>;tag=as6f4bc61\r\n\
         Call-ID: {call_id}\r\n\
         CSeq: 2 BYE\r\n\
         Content-Length: 0\r\n\r\n",
        branch = short_id(),
        tag = short_id(),
    )
}
