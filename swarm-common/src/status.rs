// Copyright 2025 The Swarm Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//  http://www.apache.org/licenses/LICENSE-2.0

//! Swarm status/error types.

use std::fmt;

/// Status codes for Swarm operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i8)]
pub enum StatusCode {
    OK = 0,
    KeyError = 2,
    Invalid = 4,
    IOError = 5,
    UnknownError = 9,
    NotImplemented = 10,
    TimedOut = 12,
    Interrupted = 13,
    NotFound = 17,
    Disconnected = 18,
    AlreadyExists = 20,
    RpcError = 30,
    InvalidArgument = 34,
    PermissionDenied = 37,
}

impl StatusCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OK => "OK",
            Self::KeyError => "KeyError",
            Self::Invalid => "Invalid",
            Self::IOError => "IOError",
            Self::UnknownError => "UnknownError",
            Self::NotImplemented => "NotImplemented",
            Self::TimedOut => "TimedOut",
            Self::Interrupted => "Interrupted",
            Self::NotFound => "NotFound",
            Self::Disconnected => "Disconnected",
            Self::AlreadyExists => "AlreadyExists",
            Self::RpcError => "RpcError",
            Self::InvalidArgument => "InvalidArgument",
            Self::PermissionDenied => "PermissionDenied",
        }
    }

    /// Parse a status code from its string name.
    pub fn from_str_name(s: &str) -> Option<Self> {
        match s {
            "OK" => Some(Self::OK),
            "KeyError" => Some(Self::KeyError),
            "Invalid" => Some(Self::Invalid),
            "IOError" => Some(Self::IOError),
            "UnknownError" => Some(Self::UnknownError),
            "NotImplemented" => Some(Self::NotImplemented),
            "TimedOut" => Some(Self::TimedOut),
            "Interrupted" => Some(Self::Interrupted),
            "NotFound" => Some(Self::NotFound),
            "Disconnected" => Some(Self::Disconnected),
            "AlreadyExists" => Some(Self::AlreadyExists),
            "RpcError" => Some(Self::RpcError),
            "InvalidArgument" => Some(Self::InvalidArgument),
            "PermissionDenied" => Some(Self::PermissionDenied),
            _ => None,
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The primary error type for Swarm operations.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{code}: {message}")]
pub struct SwarmError {
    pub code: StatusCode,
    pub message: String,
    /// For RpcError, the gRPC status code.
    pub rpc_code: Option<i32>,
}

impl SwarmError {
    pub fn new(code: StatusCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            rpc_code: None,
        }
    }

    pub fn with_rpc_code(code: StatusCode, message: impl Into<String>, rpc_code: i32) -> Self {
        Self {
            code,
            message: message.into(),
            rpc_code: Some(rpc_code),
        }
    }

    // Convenience constructors
    pub fn key_error(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::KeyError, msg)
    }
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::Invalid, msg)
    }
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::IOError, msg)
    }
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::NotFound, msg)
    }
    pub fn not_implemented(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::NotImplemented, msg)
    }
    pub fn timed_out(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::TimedOut, msg)
    }
    pub fn disconnected(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::Disconnected, msg)
    }
    pub fn already_exists(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::AlreadyExists, msg)
    }
    pub fn rpc_error(msg: impl Into<String>, rpc_code: i32) -> Self {
        Self::with_rpc_code(StatusCode::RpcError, msg, rpc_code)
    }
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::InvalidArgument, msg)
    }
    pub fn interrupted(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::Interrupted, msg)
    }
    pub fn permission_denied(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::PermissionDenied, msg)
    }

    // Status code predicates
    pub fn is_key_error(&self) -> bool {
        self.code == StatusCode::KeyError
    }
    pub fn is_not_found(&self) -> bool {
        self.code == StatusCode::NotFound
    }
    pub fn is_timed_out(&self) -> bool {
        self.code == StatusCode::TimedOut
    }
    pub fn is_disconnected(&self) -> bool {
        self.code == StatusCode::Disconnected
    }
    pub fn is_rpc_error(&self) -> bool {
        self.code == StatusCode::RpcError
    }
    pub fn is_invalid_argument(&self) -> bool {
        self.code == StatusCode::InvalidArgument
    }
}

/// Convenience type alias: `Result<T, SwarmError>`.
pub type SwarmResult<T> = Result<T, SwarmError>;
