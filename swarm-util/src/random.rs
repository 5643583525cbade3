// Copyright 2025 The Swarm Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//  http://www.apache.org/licenses/LICENSE-2.0

//! Random number utilities.

use rand::Rng;

/// Fill a byte slice with random bytes.
pub fn fill_random(buf: &mut [u8]) {
    rand::thread_rng().fill(buf);
}

/// Generate a random byte vector of the given length.
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut buf = vec![0u8; len];
    fill_random(&mut buf);
    buf
}
