//! Loopback integration tests over a real TCP socket.
//!
//! A reader thread accepts one connection on an ephemeral port and drains it
//! to a byte buffer; the client under test connects, emits commands, and
//! closes. The wire carries concatenated JSON objects with no framing, so
//! the assertions parse with a streaming deserializer.

use std::io::Read;
use std::net::TcpListener;
use std::thread;

use commands::{AreaType, Color, Side};
use rewind_client::RewindClient;
use rewind_client::demo::{self, DemoConfig};

fn spawn_reader() -> (u16, thread::JoinHandle<Vec<u8>>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback");
    let port = listener.local_addr().expect("local addr").port();
    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("accept");
        let mut bytes = Vec::new();
        stream.read_to_end(&mut bytes).expect("drain stream");
        bytes
    });
    (port, handle)
}

fn parse(bytes: &[u8]) -> Vec<serde_json::Value> {
    serde_json::Deserializer::from_slice(bytes)
        .into_iter::<serde_json::Value>()
        .collect::<Result<_, _>>()
        .expect("valid command stream")
}

#[test]
fn commands_arrive_in_call_order() {
    let (port, reader) = spawn_reader();

    let mut client = RewindClient::connect("127.0.0.1", port).expect("connect");
    client.circle(10.0, 20.0, 5.0, Color::RED, 2).expect("circle");
    client.rect(0.0, 0.0, 8.0, 8.0, Color::GREEN, 1).expect("rect");
    client.end_frame().expect("end");
    client.close().expect("close");

    let values = parse(&reader.join().expect("reader thread"));
    let types: Vec<&str> = values
        .iter()
        .map(|value| value["type"].as_str().expect("type field"))
        .collect();
    assert_eq!(types, ["circle", "rectangle", "end"]);
}

#[test]
fn trailing_message_is_flushed_before_close() {
    let (port, reader) = spawn_reader();

    let mut client = RewindClient::connect("127.0.0.1", port).expect("connect");
    client.message("Bye!").expect("message");
    client.close().expect("close");

    let values = parse(&reader.join().expect("reader thread"));
    assert_eq!(values.len(), 1);
    assert_eq!(values[0]["type"], "message");
    assert_eq!(values[0]["message"], "Bye!");
}

#[test]
fn mixed_primitives_round_trip_through_the_socket() {
    let (port, reader) = spawn_reader();

    let mut client = RewindClient::connect("127.0.0.1", port).expect("connect");
    client
        .frame(|client| {
            client.area_description(0, 0, AreaType::Forest)?;
            client.living_unit_smaller(1.0, 2.0, 3.0, 10, 100, Side::Enemy)?;
            client.popup(1.0, 2.0, 4.0, "contact")
        })
        .expect("frame");
    client.close().expect("close");

    let values = parse(&reader.join().expect("reader thread"));
    assert_eq!(values.len(), 4);
    assert_eq!(values[0]["area_type"], 1);
    assert_eq!(values[1]["enemy"], 1);
    assert_eq!(values[1]["selected"], 0);
    assert_eq!(values[2]["text"], "contact");
    assert_eq!(values[3]["type"], "end");
}

#[test]
fn reduced_demo_scene_streams_cleanly() {
    let (port, reader) = spawn_reader();

    let mut client = RewindClient::connect("127.0.0.1", port).expect("connect");
    demo::run(
        &mut client,
        &DemoConfig {
            world_size: 64,
            steps: 3,
            units_per_step: 2,
            seed: 123,
        },
    )
    .expect("demo run");
    client.close().expect("close");

    let values = parse(&reader.join().expect("reader thread"));
    // terrain frame + 3 step frames + closing frame
    let ends = values.iter().filter(|value| value["type"] == "end").count();
    assert_eq!(ends, 5);
    assert_eq!(values.last().expect("non-empty stream")["type"], "end");
}
