#![allow(dead_code)]
use hickory_proto::op::{Message, MessageType, ResponseCode};
use hickory_proto::rr::rdata::{A, CNAME};
use hickory_proto::rr::{Name, RData, Record};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, UdpSocket};
use tokio::sync::oneshot;

/// What the mock upstream sends back for every query it receives.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// NOERROR with one A record per address, in order.
    Answer(Vec<Ipv4Addr>),
    /// NOERROR with a CNAME to `target` followed by an A record.
    CnameThenA(String, Ipv4Addr),
    /// Empty reply carrying the given code.
    Rcode(ResponseCode),
    /// Correct answer with the ID flipped.
    WrongId(Ipv4Addr),
    /// A header promising records that are not there.
    Garbage,
    /// Never answers.
    Silent,
}

/// Local upstream on 127.0.0.1 with an OS-assigned port.
pub struct MockDnsServer {
    addr: SocketAddr,
    hits: Arc<AtomicUsize>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    pub async fn udp(reply: MockReply) -> Self {
        let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let addr = socket.local_addr().unwrap();
        let hits = Arc::new(AtomicUsize::new(0));
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        let counter = hits.clone();
        tokio::spawn(async move {
            let mut buf = vec![0u8; 4096];
            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    result = socket.recv_from(&mut buf) => {
                        let Ok((len, peer)) = result else { continue };
                        counter.fetch_add(1, Ordering::SeqCst);
                        if let Some(response) = build_reply(&buf[..len], &reply) {
                            let _ = socket.send_to(&response, peer).await;
                        }
                    }
                }
            }
        });

        Self {
            addr,
            hits,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    pub async fn tcp(reply: MockReply) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let hits = Arc::new(AtomicUsize::new(0));
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        let counter = hits.clone();
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    accepted = listener.accept() => {
                        let Ok((mut stream, _)) = accepted else { continue };
                        let counter = counter.clone();
                        let reply = reply.clone();
                        tokio::spawn(async move {
                            let mut len_buf = [0u8; 2];
                            if stream.read_exact(&mut len_buf).await.is_err() {
                                return;
                            }
                            let mut query = vec![0u8; u16::from_be_bytes(len_buf) as usize];
                            if stream.read_exact(&mut query).await.is_err() {
                                return;
                            }
                            counter.fetch_add(1, Ordering::SeqCst);

                            match build_reply(&query, &reply) {
                                Some(response) => {
                                    let len = (response.len() as u16).to_be_bytes();
                                    let _ = stream.write_all(&len).await;
                                    let _ = stream.write_all(&response).await;
                                }
                                None => tokio::time::sleep(Duration::from_secs(30)).await,
                            }
                        });
                    }
                }
            }
        });

        Self {
            addr,
            hits,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn udp_endpoint(&self) -> String {
        format!("udp://{}", self.addr)
    }

    pub fn tcp_endpoint(&self) -> String {
        format!("tcp://{}", self.addr)
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

pub fn encode(message: &Message) -> Vec<u8> {
    let mut buf = Vec::new();
    let mut encoder = BinEncoder::new(&mut buf);
    message.emit(&mut encoder).unwrap();
    buf
}

fn build_reply(query: &[u8], reply: &MockReply) -> Option<Vec<u8>> {
    if let MockReply::Silent = reply {
        return None;
    }
    if let MockReply::Garbage = reply {
        let mut bytes = query.get(0..2)?.to_vec();
        bytes.extend_from_slice(&[0x81, 0x80, 0x00, 0x01, 0x00, 0x05, 0x00, 0x00, 0x00, 0x00]);
        return Some(bytes);
    }

    let request = Message::from_vec(query).ok()?;
    let question = request.queries().first()?.clone();
    let name = question.name().clone();

    let mut response = Message::new(request.id(), MessageType::Response, request.op_code());
    response.set_recursion_desired(request.recursion_desired());
    response.set_recursion_available(true);
    response.add_query(question);

    match reply {
        MockReply::Answer(addresses) => {
            for address in addresses {
                response.add_answer(Record::from_rdata(name.clone(), 300, RData::A(A(*address))));
            }
        }
        MockReply::CnameThenA(target, address) => {
            let target = Name::from_ascii(target).unwrap();
            response.add_answer(Record::from_rdata(
                name,
                300,
                RData::CNAME(CNAME(target.clone())),
            ));
            response.add_answer(Record::from_rdata(target, 300, RData::A(A(*address))));
        }
        MockReply::Rcode(code) => {
            response.set_response_code(*code);
        }
        MockReply::WrongId(address) => {
            response.add_answer(Record::from_rdata(name, 300, RData::A(A(*address))));
            let mut bytes = encode(&response);
            bytes[0] ^= 0xFF;
            return Some(bytes);
        }
        MockReply::Garbage | MockReply::Silent => unreachable!(),
    }

    Some(encode(&response))
}
