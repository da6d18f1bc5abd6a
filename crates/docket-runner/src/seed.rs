use rand::Rng;

use docket_core::NewRecord;

use crate::SeedConfig;

/// A random demo record: lowercase title, uniform size and priority.
pub fn random_record<R: Rng + ?Sized>(rng: &mut R, cfg: &SeedConfig) -> NewRecord {
    let title: String = (0..cfg.title_len.max(1)).map(|_| char::from(rng.gen_range(b'a'..=b'z'))).collect();
    let size = rng.gen_range(0..=cfg.max_size);
    let priority = rng.gen_range(0..=cfg.max_priority.max(0));
    NewRecord::new(title, size, priority)
}
