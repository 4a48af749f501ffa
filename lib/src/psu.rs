// Copyright (C) 2025 Intel Corporation
// SPDX-License-Identifier: MIT

//! Power supplies reached through the chassis bus.
//!
//! The PMBus command codes are sent as chassis command bytes. Switching a power supply off is
//! gated by a [PowerGuard] that enforces a cool-down period between two power-off requests.

use crate::chassis::ChassisClient;
use crate::error::Error;
use crate::pmbus::{self, Linear11, PmbusCommand, StatusFlags, StatusWord};
use crate::record::Response;
use crate::transport::{ChassisTransport, DeviceAddress, DeviceType, Priority};
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Minimum delay between two power-off requests.
pub const DEFAULT_BACKOFF: Duration = Duration::from_secs(30);

/// Values of the PMBus OPERATION register.
const OPERATION_ON: u8 = 0x80;
const OPERATION_OFF: u8 = 0x00;

/// Configuration of the power-off guard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serialize",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct GuardConfig {
    pub backoff: Duration,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            backoff: DEFAULT_BACKOFF,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PowerAction {
    On,
    Off,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardState {
    CanPowerOff,
    /// A power-off request was accepted less than the backoff period ago.
    CoolingDown { remaining: Duration },
}

/// Debounces the power-off requests sent to a power supply.
#[derive(Debug)]
pub struct PowerGuard {
    backoff: Duration,
    last_power_off: Mutex<Option<Instant>>,
}

impl Default for PowerGuard {
    fn default() -> Self {
        Self::new(GuardConfig::default())
    }
}

impl PowerGuard {
    pub fn new(config: GuardConfig) -> Self {
        Self {
            backoff: config.backoff,
            last_power_off: Mutex::new(None),
        }
    }

    #[inline]
    pub fn backoff(&self) -> Duration {
        self.backoff
    }

    fn remaining(&self, last_power_off: Option<Instant>, now: Instant) -> Option<Duration> {
        let elapsed = now.saturating_duration_since(last_power_off?);
        (elapsed < self.backoff).then(|| self.backoff - elapsed)
    }

    /// Checks whether `action` can be performed now.
    pub fn request(&self, action: PowerAction) -> Result<(), Error> {
        self.request_at(action, Instant::now())
    }

    /// Checks whether `action` can be performed at `now`.
    ///
    /// Power-on requests are always accepted. An accepted power-off request starts a new
    /// cool-down period.
    pub fn request_at(&self, action: PowerAction, now: Instant) -> Result<(), Error> {
        if action == PowerAction::On {
            return Ok(());
        }

        let mut last_power_off = self
            .last_power_off
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(remaining) = self.remaining(*last_power_off, now) {
            log::warn!("Power-off rejected, cooling down for {remaining:?}");
            return Err(Error::CoolingDown(remaining));
        }
        *last_power_off = Some(now);
        Ok(())
    }

    pub fn state_at(&self, now: Instant) -> GuardState {
        let last_power_off = *self
            .last_power_off
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        match self.remaining(last_power_off, now) {
            Some(remaining) => GuardState::CoolingDown { remaining },
            None => GuardState::CanPowerOff,
        }
    }

    pub fn state(&self) -> GuardState {
        self.state_at(Instant::now())
    }
}

/// Health summary of a power supply.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PsuStatus {
    pub status_word: StatusWord,
    pub power_good: bool,
    pub healthy: bool,
    pub flags: StatusFlags,
}

impl From<StatusWord> for PsuStatus {
    fn from(status_word: StatusWord) -> Self {
        Self {
            status_word,
            power_good: status_word.power_good(),
            healthy: status_word.is_healthy(),
            flags: status_word.flags(),
        }
    }
}

/// A power supply of the chassis.
pub struct Psu<T: ChassisTransport> {
    client: ChassisClient<T>,
    address: DeviceAddress,
    priority: Priority,
    guard: PowerGuard,
}

impl<T: ChassisTransport> Psu<T> {
    pub fn new(transport: T, device_id: u8, config: GuardConfig) -> Self {
        Self {
            client: ChassisClient::new(transport),
            address: DeviceAddress::new(DeviceType::Psu, device_id),
            priority: Priority::default(),
            guard: PowerGuard::new(config),
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn address(&self) -> DeviceAddress {
        self.address
    }

    pub fn guard(&self) -> &PowerGuard {
        &self.guard
    }

    fn execute(&self, command: PmbusCommand, payload: &[u8]) -> Result<Vec<u8>, Error> {
        self.client
            .transact(self.priority, self.address, command.code(), payload)
            .into_result()
    }

    fn query<U: Default>(
        &self,
        command: PmbusCommand,
        decode: impl FnOnce(&[u8]) -> Result<U, Error>,
    ) -> Response<U> {
        let result = self.execute(command, &[]).and_then(|payload| {
            let value = command.validate_response(&payload)?;
            decode(value)
        });
        if let Err(err) = &result {
            log::debug!("{command} on {}: {err}", self.address);
        }
        result.into()
    }

    /// Reads STATUS_WORD.
    pub fn status(&self) -> Response<PsuStatus> {
        self.query(PmbusCommand::StatusWord, |payload| {
            StatusWord::from_slice(payload).map(PsuStatus::from)
        })
    }

    /// Reads the output power in milliwatts.
    pub fn power_reading(&self) -> Response<i64> {
        self.query(PmbusCommand::ReadPout, pmbus::decode_power)
    }

    /// Reads a telemetry register using the linear data format (READ_VIN, READ_IOUT...).
    pub fn read_linear(&self, command: PmbusCommand) -> Response<Linear11> {
        self.query(command, Linear11::from_slice)
    }

    pub fn manufacturer(&self) -> Response<String> {
        self.query(PmbusCommand::MfrId, |payload| {
            Ok(pmbus::decode_block_string(payload))
        })
    }

    pub fn model(&self) -> Response<String> {
        self.query(PmbusCommand::MfrModel, |payload| {
            Ok(pmbus::decode_block_string(payload))
        })
    }

    pub fn serial(&self) -> Response<String> {
        self.query(PmbusCommand::MfrSerial, |payload| {
            Ok(pmbus::decode_block_string(payload))
        })
    }

    /// Reads a register from its raw command code.
    pub fn read_raw(&self, code: u8) -> Response<Vec<u8>> {
        match pmbus::lookup(code) {
            Ok((command, _)) => self.query(command, |payload| Ok(payload.to_vec())),
            Err(err) => {
                log::warn!("Cannot read register {code:#04x} of {}: {err}", self.address);
                Response::from_error(&err)
            }
        }
    }

    /// Switches the power supply output on or off.
    ///
    /// Power-off requests received during the cool-down period are rejected with
    /// [CompletionCode::NOT_SUPPORTED_IN_PRESENT_STATE](crate::completion::CompletionCode)
    /// without reaching the device.
    pub fn set_power(&self, on: bool) -> Response<()> {
        let (action, operation) = if on {
            (PowerAction::On, OPERATION_ON)
        } else {
            (PowerAction::Off, OPERATION_OFF)
        };

        let result = self
            .guard
            .request(action)
            .and_then(|_| self.execute(PmbusCommand::Operation, &[operation]))
            .map(|_| ());
        result.into()
    }

    pub fn clear_faults(&self) -> Response<()> {
        self.execute(PmbusCommand::ClearFaults, &[])
            .map(|_| ())
            .into()
    }
}
