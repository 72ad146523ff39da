use std::fs;
use tempfile::tempdir;

use amqplite_cli::commands::{body, inspect};
use amqplite_core::section::Section;
use amqplite_core::{Message, MessageCodec, Value};
use bytes::Bytes;

fn encoded_message() -> Vec<u8> {
    let mut message = Message::with_body(Value::Uint(42));
    message.properties = Some(amqplite_core::section::Properties {
        message_id: Some(Value::string("m-1")),
        ..Default::default()
    });
    MessageCodec::amqp().encode(&message).to_vec()
}

#[test]
fn inspect_report_and_json_both_work() {
    let td = tempdir().unwrap();
    let path = td.path().join("msg.amqp");
    fs::write(&path, encoded_message()).unwrap();

    inspect::execute(path.to_str().unwrap(), false).unwrap();
    inspect::execute(path.to_str().unwrap(), true).unwrap();
}

#[test]
fn inspect_rejects_garbage() {
    let td = tempdir().unwrap();
    let path = td.path().join("garbage.amqp");
    fs::write(&path, [0xFFu8; 32]).unwrap();

    assert!(inspect::execute(path.to_str().unwrap(), false).is_err());
}

#[test]
fn inspect_empty_message_reports_all_absent() {
    let td = tempdir().unwrap();
    let path = td.path().join("empty.amqp");
    fs::write(&path, []).unwrap();

    inspect::execute(path.to_str().unwrap(), false).unwrap();
}

#[test]
fn body_command_handles_each_variant() {
    let td = tempdir().unwrap();
    let codec = MessageCodec::amqp();

    let value_path = td.path().join("value.amqp");
    fs::write(&value_path, codec.encode(&Message::with_body(Value::Uint(42)))).unwrap();
    body::execute(value_path.to_str().unwrap()).unwrap();

    let mut data_message = Message::new();
    data_message.body_section = Some(Section::Data(Bytes::from_static(&[1, 2, 3])));
    let data_path = td.path().join("data.amqp");
    fs::write(&data_path, codec.encode(&data_message)).unwrap();
    body::execute(data_path.to_str().unwrap()).unwrap();

    let bodyless_path = td.path().join("none.amqp");
    fs::write(&bodyless_path, codec.encode(&Message::new())).unwrap();
    body::execute(bodyless_path.to_str().unwrap()).unwrap();
}
