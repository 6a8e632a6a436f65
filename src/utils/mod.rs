//! Misc low-level helpers used across `ncmt`.

pub mod rayon_pool;

pub use rayon_pool::{maybe_par_map, with_pool, PoolConfig};

/// Lowercase hex of at most `max` leading bytes, with `…` when truncated.
///
/// Used to keep hashes short in log lines.
pub fn short_hex(data: &[u8], max: usize) -> String {
    const LUT: &[u8; 16] = b"0123456789abcdef";
    let shown = &data[..data.len().min(max)];
    let mut s = String::with_capacity(shown.len() * 2 + 3);
    for &b in shown {
        s.push(LUT[(b >> 4) as usize] as char);
        s.push(LUT[(b & 0x0f) as usize] as char);
    }
    if data.len() > max {
        s.push('…');
    }
    s
}
