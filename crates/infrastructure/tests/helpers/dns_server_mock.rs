#![allow(dead_code)]
use gtld_census_domain::RecordType;
use std::collections::HashMap;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, UdpSocket};
use tokio::sync::oneshot;

const RCODE_NXDOMAIN: u8 = 3;
pub const RCODE_SERVFAIL: u8 = 2;
pub const RCODE_REFUSED: u8 = 5;

/// Record data the mock can put in an answer section.
#[derive(Debug, Clone)]
pub enum MockRdata {
    A(Ipv4Addr),
    Aaaa(Ipv6Addr),
    /// Any type whose rdata is a single domain name (NS, PTR, CNAME).
    Name(RecordType, String),
}

impl MockRdata {
    fn type_code(&self) -> u16 {
        match self {
            MockRdata::A(_) => RecordType::A.to_u16(),
            MockRdata::Aaaa(_) => RecordType::AAAA.to_u16(),
            MockRdata::Name(record_type, _) => record_type.to_u16(),
        }
    }

    fn encode(&self) -> Vec<u8> {
        match self {
            MockRdata::A(ip) => ip.octets().to_vec(),
            MockRdata::Aaaa(ip) => ip.octets().to_vec(),
            MockRdata::Name(_, name) => encode_name(name),
        }
    }
}

#[derive(Debug, Clone)]
pub enum MockAnswer {
    /// NOERROR with these records; empty means NODATA.
    Records(Vec<MockRdata>),
    Rcode(u8),
    /// UDP gets an empty answer with TC set; TCP gets the records.
    Truncated(Vec<MockRdata>),
    /// Never replies.
    Silent,
    /// Replies with the query id flipped.
    WrongId(Vec<MockRdata>),
}

type Table = HashMap<(String, u16), MockAnswer>;

/// Scripted DNS server on 127.0.0.1, UDP and TCP on the same port.
///
/// Names missing from the table get NXDOMAIN.
pub struct MockDnsServer {
    addr: SocketAddr,
    queries: Arc<AtomicUsize>,
    shutdown_tx: Vec<oneshot::Sender<()>>,
}

impl MockDnsServer {
    pub async fn start(answers: Vec<(&str, RecordType, MockAnswer)>) -> std::io::Result<Self> {
        let table: Arc<Table> = Arc::new(
            answers
                .into_iter()
                .map(|(name, rt, answer)| ((name.to_ascii_lowercase(), rt.to_u16()), answer))
                .collect(),
        );

        let udp = UdpSocket::bind("127.0.0.1:0").await?;
        let addr = udp.local_addr()?;
        let tcp = TcpListener::bind(addr).await?;
        let queries = Arc::new(AtomicUsize::new(0));

        let (udp_tx, mut udp_rx) = oneshot::channel::<()>();
        let (tcp_tx, mut tcp_rx) = oneshot::channel::<()>();

        let udp_table = Arc::clone(&table);
        let udp_queries = Arc::clone(&queries);
        tokio::spawn(async move {
            let mut buf = vec![0u8; 512];
            loop {
                tokio::select! {
                    _ = &mut udp_rx => break,
                    result = udp.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            udp_queries.fetch_add(1, Ordering::SeqCst);
                            if let Some(response) = respond(&udp_table, &buf[..len], false) {
                                let _ = udp.send_to(&response, peer).await;
                            }
                        }
                    }
                }
            }
        });

        let tcp_table = Arc::clone(&table);
        let tcp_queries = Arc::clone(&queries);
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = &mut tcp_rx => break,
                    accepted = tcp.accept() => {
                        let Ok((mut stream, _)) = accepted else { continue };
                        let table = Arc::clone(&tcp_table);
                        let queries = Arc::clone(&tcp_queries);
                        tokio::spawn(async move {
                            let mut len_buf = [0u8; 2];
                            if stream.read_exact(&mut len_buf).await.is_err() {
                                return;
                            }
                            let mut query = vec![0u8; u16::from_be_bytes(len_buf) as usize];
                            if stream.read_exact(&mut query).await.is_err() {
                                return;
                            }
                            queries.fetch_add(1, Ordering::SeqCst);
                            if let Some(response) = respond(&table, &query, true) {
                                let mut framed = (response.len() as u16).to_be_bytes().to_vec();
                                framed.extend_from_slice(&response);
                                let _ = stream.write_all(&framed).await;
                            }
                        });
                    }
                }
            }
        });

        Ok(Self {
            addr,
            queries,
            shutdown_tx: vec![udp_tx, tcp_tx],
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        for tx in self.shutdown_tx.drain(..) {
            let _ = tx.send(());
        }
    }
}

fn respond(table: &Table, query: &[u8], over_tcp: bool) -> Option<Vec<u8>> {
    let (name, qtype, question_end) = parse_question(query)?;

    let answer = table
        .get(&(name.to_ascii_lowercase(), qtype))
        .cloned()
        .unwrap_or(MockAnswer::Rcode(RCODE_NXDOMAIN));

    let (records, rcode, truncated, flip_id) = match answer {
        MockAnswer::Silent => return None,
        MockAnswer::Records(records) => (records, 0, false, false),
        MockAnswer::Rcode(rcode) => (Vec::new(), rcode, false, false),
        MockAnswer::Truncated(_) if !over_tcp => (Vec::new(), 0, true, false),
        MockAnswer::Truncated(records) => (records, 0, false, false),
        MockAnswer::WrongId(records) => (records, 0, false, true),
    };

    let mut response = Vec::with_capacity(512);

    let id = u16::from_be_bytes([query[0], query[1]]);
    let id = if flip_id { !id } else { id };
    response.extend_from_slice(&id.to_be_bytes());

    // QR=1, RD=1, TC as scripted
    response.push(0x81 | if truncated { 0x02 } else { 0x00 });
    // RA=1, RCODE
    response.push(0x80 | (rcode & 0x0f));

    response.extend_from_slice(&[0x00, 0x01]);
    response.extend_from_slice(&(records.len() as u16).to_be_bytes());
    response.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);

    response.extend_from_slice(&query[12..question_end]);

    for record in &records {
        let rdata = record.encode();
        response.extend_from_slice(&[0xc0, 0x0c]); // Name pointer to question
        response.extend_from_slice(&record.type_code().to_be_bytes());
        response.extend_from_slice(&[0x00, 0x01]); // Class IN
        response.extend_from_slice(&[0x00, 0x00, 0x00, 0x3c]); // TTL: 60 seconds
        response.extend_from_slice(&(rdata.len() as u16).to_be_bytes());
        response.extend_from_slice(&rdata);
    }

    Some(response)
}

/// Returns the question name (with trailing dot), its type and where the
/// question section ends.
fn parse_question(query: &[u8]) -> Option<(String, u16, usize)> {
    let mut pos = 12;
    let mut labels = Vec::new();
    loop {
        let len = *query.get(pos)? as usize;
        pos += 1;
        if len == 0 {
            break;
        }
        labels.push(String::from_utf8_lossy(query.get(pos..pos + len)?).into_owned());
        pos += len;
    }
    let qtype = u16::from_be_bytes([*query.get(pos)?, *query.get(pos + 1)?]);
    let question_end = pos + 4;
    if query.len() < question_end {
        return None;
    }

    let mut name = labels.join(".");
    name.push('.');
    Some((name, qtype, question_end))
}

fn encode_name(name: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(name.len() + 2);
    for label in name.trim_end_matches('.').split('.').filter(|l| !l.is_empty()) {
        out.push(label.len() as u8);
        out.extend_from_slice(label.as_bytes());
    }
    out.push(0);
    out
}
