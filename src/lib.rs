//! Canonical binary codec for ledger transactions and ledger objects.

/// Field registry, type codecs, container codec, and the JSON-to-bytes façade.
pub mod codec;
