// Copyright (C) 2025 Intel Corporation
// SPDX-License-Identifier: MIT

use chassis_protocol::prelude::*;

fn sample_fru() -> Fru {
    Fru::from_slice(&std::fs::read("tests/samples/blade.fru").unwrap()).unwrap()
}

#[test]
fn fru_tree() {
    let node = Node::from(&sample_fru());

    assert_eq!(node.kind, NodeType::Record);
    assert_eq!(node.value("version"), Some(&Value::Number(1)));
    assert_eq!(node.value("chassis.type"), Some(&Value::Number(0x17)));
    assert_eq!(node.value("chassis.custom.0"), Some(&Value::Text("rack=7".into())));
    assert_eq!(
        node.value("board.manufactured"),
        Some(&Value::Text("2024-03-15 12:30:00".into()))
    );
    assert_eq!(node.value("board.serial_number"), Some(&Value::Text("123456".into())));
    assert_eq!(node.value("product.asset_tag"), Some(&Value::Text("ASSET-77".into())));
    assert!(node.get_by_path("board.custom").is_none());
}

#[test]
fn psu_status_tree() {
    let status = PsuStatus::from(StatusWord::from_slice(&[0x10, 0x08]).unwrap());
    let node = Node::from(&status);

    assert_eq!(node.value("status_word"), Some(&Value::Number(0x0810)));
    assert_eq!(node.value("power_good"), Some(&Value::Number(0)));
    assert_eq!(node.value("healthy"), Some(&Value::Number(0)));
    assert!(node.get_by_path("flags.iout_overcurrent").is_none());
    assert!(node.get_by_path("flags.ioutovercurrent").is_some());
    assert!(node.get_by_path("flags.powergoodnegated").is_some());
    assert_eq!(node.get("flags").unwrap().children().count(), 2);
}

#[test]
fn duplicate_names() {
    let mut root = Node::root();
    root.add(Node::record("psu"));
    root.add(Node::record("psu"));
    root.add(Node::record("psu"));

    let names: Vec<&str> = root.children().map(|node| node.name.as_str()).collect();
    assert_eq!(names, ["psu", "psu0", "psu1"]);
}

#[cfg(feature = "serialize")]
#[test]
fn to_json() {
    let mut psu = Node::record("psu1");
    psu.add(Node::field("model", "PSU-1600W"));
    psu.add(Node::field("power_mw", 5000u64));
    let mut root = Node::root();
    root.add(psu);

    assert_eq!(
        root.to_json().unwrap(),
        r#"{"inventory":{"psu1":{"model":"PSU-1600W","power_mw":"0x1388"}}}"#
    );
}

#[cfg(feature = "serialize")]
#[test]
fn fru_to_json() {
    let json = Node::from(&sample_fru()).to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["board"]["manufacturer"], "Contoso");
    assert_eq!(value["product"]["product_name"], "PSU 1600W");
    assert_eq!(value["chassis"]["type"], "0x17");
}
