// Copyright (C) 2025 Intel Corporation
// SPDX-License-Identifier: MIT

//! A tree-like data structure containing the inventory of the chassis devices.

use crate::fru::{BoardInfo, ChassisInfo, Fru, FruString, ProductInfo};
use crate::psu::PsuStatus;
use std::collections::{BTreeMap, btree_map};

#[cfg(feature = "serialize")]
use crate::error::Error;
#[cfg(feature = "serialize")]
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Value of an inventory field
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    Number(u64),
    Text(String),
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Value::Number(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

/// Inventory tree node type
#[derive(Debug, Default, PartialEq, Eq)]
pub enum NodeType {
    /// Root of the inventory tree
    #[default]
    Root,
    /// Component of the inventory tree
    Section,
    /// Root of a device in the inventory tree
    Record,
    /// Inventory field
    Field { value: Value },
}

/// Node of the inventory tree
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Node {
    /// Name of the node
    pub name: String,
    /// Type of the node
    pub kind: NodeType,
    children: BTreeMap<String, Node>,
}

impl Node {
    /// Returns a new root node.
    ///
    /// # Examples
    ///
    /// ```
    /// use chassis_protocol::prelude::*;
    ///
    /// let root = Node::root();
    /// assert_eq!(root.kind, NodeType::Root);
    /// ```
    pub fn root() -> Node {
        Node::default()
    }

    /// Returns a new section node.
    pub fn section(name: &str) -> Node {
        Node {
            name: name.to_lowercase(),
            kind: NodeType::Section,
            ..Node::default()
        }
    }

    /// Returns a new record node.
    ///
    /// # Examples
    ///
    /// ```
    /// use chassis_protocol::prelude::*;
    ///
    /// let node = Node::record("PSU1");
    /// assert_eq!(node.kind, NodeType::Record);
    /// assert_eq!(node.name, "psu1");
    /// ```
    pub fn record(name: &str) -> Node {
        Node {
            name: name.to_lowercase(),
            kind: NodeType::Record,
            ..Node::default()
        }
    }

    /// Returns a new field node.
    ///
    /// # Examples
    ///
    /// ```
    /// use chassis_protocol::prelude::*;
    ///
    /// let node = Node::field("power_good", 1u64);
    /// assert_eq!(node.kind, NodeType::Field { value: Value::Number(1) });
    ///
    /// let node = Node::field("serial_number", "SN0042");
    /// assert_eq!(node.kind, NodeType::Field { value: Value::Text("SN0042".into()) });
    /// ```
    pub fn field(name: &str, value: impl Into<Value>) -> Node {
        Node {
            name: name.to_lowercase(),
            kind: NodeType::Field {
                value: value.into(),
            },
            ..Node::default()
        }
    }

    /// Returns a reference to a child of the node. If the child does not exist, [`None`] is
    /// returned.
    pub fn get(&self, name: &str) -> Option<&Node> {
        self.children.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Node> {
        self.children.get_mut(name)
    }

    /// Returns a reference to the node in the tree located at the specified `path`. The `path`
    /// consists in a `&str` representing the names of the parent nodes separated by `.` (For
    /// example: `fru.board.manufacturer`).
    ///
    /// # Examples
    ///
    /// ```
    /// use chassis_protocol::prelude::*;
    ///
    /// let mut board = Node::section("board");
    /// board.add(Node::field("manufacturer", "ACME"));
    /// let mut root = Node::root();
    /// root.add(board);
    ///
    /// assert_eq!(
    ///     root.get_by_path("board.manufacturer"),
    ///     Some(&Node::field("manufacturer", "ACME"))
    /// );
    /// assert_eq!(root.get_by_path("board.serial_number"), None);
    /// ```
    pub fn get_by_path(&self, path: &str) -> Option<&Node> {
        let mut ptr = self;
        for name in path.split('.') {
            ptr = ptr.get(name)?
        }
        Some(ptr)
    }

    /// Returns the value of the field located at `path`.
    pub fn value(&self, path: &str) -> Option<&Value> {
        match &self.get_by_path(path)?.kind {
            NodeType::Field { value } => Some(value),
            _ => None,
        }
    }

    /// Adds a child to the node. A child with the same name gets an instance number appended.
    pub fn add(&mut self, mut node: Node) {
        let name = node.name.clone();
        let mut instance = 0;
        while self.children.contains_key(&node.name) {
            node.name = format!("{name}{instance}");
            instance += 1
        }
        let _ = self.children.insert(node.name.clone(), node);
    }

    /// Returns an iterator over the node's children. The children nodes are sorted alphabetically.
    ///
    /// # Examples
    ///
    /// ```
    /// use chassis_protocol::prelude::*;
    ///
    /// let mut root = Node::root();
    /// root.add(Node::record("psu1"));
    /// root.add(Node::record("bmc"));
    ///
    /// let mut children = root.children();
    /// assert_eq!(children.next(), Some(&Node::record("bmc")));
    /// assert_eq!(children.next(), Some(&Node::record("psu1")));
    /// assert_eq!(children.next(), None);
    /// ```
    pub fn children(&self) -> NodeChildren {
        NodeChildren {
            iter: self.children.values(),
        }
    }

    /// Serializes the tree into a JSON string.
    #[cfg(feature = "serialize")]
    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string(self)?)
    }

    fn add_string(&mut self, name: &str, field: &FruString) {
        self.add(Node::field(name, field.decode()))
    }

    fn add_custom_fields(&mut self, fields: &[FruString]) {
        if fields.is_empty() {
            return;
        }
        let mut custom = Node::section("custom");
        for (index, field) in fields.iter().enumerate() {
            custom.add_string(&index.to_string(), field);
        }
        self.add(custom)
    }
}

impl From<&ChassisInfo> for Node {
    fn from(info: &ChassisInfo) -> Self {
        let mut node = Node::section("chassis");
        node.add(Node::field("type", info.chassis_type as u64));
        node.add_string("part_number", &info.part_number);
        node.add_string("serial_number", &info.serial_number);
        node.add_custom_fields(&info.custom_fields);
        node
    }
}

impl From<&BoardInfo> for Node {
    fn from(info: &BoardInfo) -> Self {
        let mut node = Node::section("board");
        node.add(Node::field("language", info.language as u64));
        if let Some(date) = info.manufactured() {
            node.add(Node::field("manufactured", date.to_string()));
        }
        node.add_string("manufacturer", &info.manufacturer);
        node.add_string("product_name", &info.product_name);
        node.add_string("serial_number", &info.serial_number);
        node.add_string("part_number", &info.part_number);
        node.add_string("fru_file_id", &info.fru_file_id);
        node.add_custom_fields(&info.custom_fields);
        node
    }
}

impl From<&ProductInfo> for Node {
    fn from(info: &ProductInfo) -> Self {
        let mut node = Node::section("product");
        node.add(Node::field("language", info.language as u64));
        node.add_string("manufacturer", &info.manufacturer);
        node.add_string("product_name", &info.product_name);
        node.add_string("part_number", &info.part_number);
        node.add_string("version", &info.version);
        node.add_string("serial_number", &info.serial_number);
        node.add_string("asset_tag", &info.asset_tag);
        node.add_string("fru_file_id", &info.fru_file_id);
        node.add_custom_fields(&info.custom_fields);
        node
    }
}

impl From<&Fru> for Node {
    fn from(fru: &Fru) -> Self {
        let mut node = Node::record("fru");
        node.add(Node::field("version", fru.header.version as u64));
        if let Some(chassis) = &fru.chassis {
            node.add(chassis.into());
        }
        if let Some(board) = &fru.board {
            node.add(board.into());
        }
        if let Some(product) = &fru.product {
            node.add(product.into());
        }
        node
    }
}

impl From<&PsuStatus> for Node {
    fn from(status: &PsuStatus) -> Self {
        let mut node = Node::section("status");
        node.add(Node::field("status_word", status.status_word.as_u16() as u64));
        node.add(Node::field("power_good", status.power_good as u64));
        node.add(Node::field("healthy", status.healthy as u64));

        let mut flags = Node::section("flags");
        for flag in status.flags.iter() {
            flags.add(Node::field(&format!("{flag:?}"), 1u64));
        }
        node.add(flags);
        node
    }
}

#[cfg(feature = "serialize")]
impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Number(value) => serializer.serialize_str(&format!("0x{value:x}")),
            Value::Text(text) => serializer.serialize_str(text),
        }
    }
}

#[cfg(feature = "serialize")]
impl Serialize for Node {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match &self.kind {
            NodeType::Field { value } => {
                if self.children.is_empty() {
                    value.serialize(serializer)
                } else {
                    let mut map = serializer.serialize_map(Some(self.children.len() + 1))?;
                    map.serialize_entry("_value", value)?;
                    for (k, v) in self.children.iter() {
                        map.serialize_entry(k, v)?;
                    }
                    map.end()
                }
            }
            NodeType::Root => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("inventory", &self.children)?;
                map.end()
            }
            _ => {
                let mut map = serializer.serialize_map(Some(self.children.len()))?;
                for (k, v) in self.children.iter() {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

/// An iterator over the children of a node.
///
/// This struct is created by the [`children`] method on a [`Node`].
///
/// [`children`]: Node::children
pub struct NodeChildren<'a> {
    iter: btree_map::Values<'a, String, Node>,
}

impl<'a> Iterator for NodeChildren<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next()
    }
}
