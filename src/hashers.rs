use std::io::Read;

pub fn compute_hash_for_reader<R: Read>(mut reader: R) -> std::io::Result<String> {
    let mut hasher = blake3::Hasher::new();
    let mut buf = [0u8; 64 * 1024];
    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 { break; }
        hasher.update(&buf[..n]);
    }
    Ok(hasher.finalize().to_hex().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn streams_larger_than_buffer() {
        let data = vec![7u8; 200 * 1024];
        let digest = compute_hash_for_reader(&data[..]).unwrap();
        assert_eq!(digest, blake3::hash(&data).to_hex().to_string());
        assert_eq!(digest.len(), 64);
    }
}
