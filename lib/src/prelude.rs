// Copyright (C) 2025 Intel Corporation
// SPDX-License-Identifier: MIT

//! Convenience re-export of common structs

pub use crate::chassis::{ChassisClient, ChassisRequest};
pub use crate::completion::CompletionCode;
pub use crate::error::Error;
pub use crate::fru::{BoardInfo, ChassisInfo, Fru, FruString, ProductInfo};
pub use crate::ipmi::{
    IpmiClient, IpmiConfig, IpmiFrame, IpmiRequest, RequesterAddress, TransportKind,
};
pub use crate::node::{Node, NodeType, Value};
pub use crate::pmbus::{Linear11, PmbusCommand, StatusFlag, StatusWord};
pub use crate::psu::{GuardConfig, GuardState, PowerAction, PowerGuard, Psu, PsuStatus};
pub use crate::record::{Message, Response};
pub use crate::transport::{ChassisTransport, DeviceAddress, DeviceType, IpmiTransport, Priority};
