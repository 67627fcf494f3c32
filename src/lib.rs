#![no_std]

//! A deframer reassembling length-delimited packets from a stream of tagged
//! bits.
//!
//! Deframer consumes the output of an access-code correlator: one data bit per
//! item, with a flag marking the first bit after each synchronization marker.
//! Following each marker, a redundant 32-bit header declares the payload
//! length, and the payload bits are collected into bytes until the packet is
//! complete.
//!
//! Most users should begin with the drivers and the [`Sink`](avec::Sink) trait
//! in the [`avec`] module. Applications needing finer control (such as those
//! running on embedded systems, or counting discarded frames) can drive the
//! state machine in the [`sans`] module directly, one bit at a time.
//!
//! ## Cargo Features
//!
//! The following crate feature flags are available:
//!
//! - `std`: enable reader-based driver and collecting sinks (default).

pub mod avec;
pub mod sans;
