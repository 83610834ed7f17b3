// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use base64::{engine::general_purpose::STANDARD, Engine};
use rand::RngCore;

/// 生成 HS256 签名密钥（256 位，Base64 编码）
fn main() {
    let mut key = [0u8; 32];
    rand::rng().fill_bytes(&mut key);

    println!("Generated JWT key (set PROXIMASHARE__JWT__SECRET or jwt.secret):");
    println!("jwt.secret={}", STANDARD.encode(key));
}
