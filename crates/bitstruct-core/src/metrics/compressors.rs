//! zlib, bzip2 and xz (LZMA) compression ratios.

use std::io::Write;

use super::{Metric, MetricInfo, capped_ratio};
use crate::bits::Bitstring;

fn compressed_len<W, F>(packed: &[u8], encoder: W, finish: F) -> std::io::Result<usize>
where
    W: Write,
    F: FnOnce(W) -> std::io::Result<Vec<u8>>,
{
    let mut enc = encoder;
    enc.write_all(packed)?;
    finish(enc).map(|out| out.len())
}

// ---------------------------------------------------------------------------
// zlib
// ---------------------------------------------------------------------------

static ZLIB_INFO: MetricInfo = MetricInfo {
    name: "zlib",
    description: "zlib (DEFLATE) level-9 compression ratio",
};

pub struct ZlibRatio;

impl Metric for ZlibRatio {
    fn info(&self) -> &MetricInfo {
        &ZLIB_INFO
    }

    fn ratio(&self, bits: &Bitstring) -> f64 {
        use flate2::Compression;
        use flate2::write::ZlibEncoder;

        let packed = bits.pack();
        let len = compressed_len(
            &packed,
            ZlibEncoder::new(Vec::new(), Compression::best()),
            |enc| enc.finish(),
        );
        capped_ratio(len, packed.len())
    }
}

// ---------------------------------------------------------------------------
// bzip2
// ---------------------------------------------------------------------------

static BZIP2_INFO: MetricInfo = MetricInfo {
    name: "bz2",
    description: "bzip2 (BWT) level-9 compression ratio",
};

pub struct Bzip2Ratio;

impl Metric for Bzip2Ratio {
    fn info(&self) -> &MetricInfo {
        &BZIP2_INFO
    }

    fn ratio(&self, bits: &Bitstring) -> f64 {
        use bzip2::Compression;
        use bzip2::write::BzEncoder;

        let packed = bits.pack();
        let len = compressed_len(
            &packed,
            BzEncoder::new(Vec::new(), Compression::best()),
            |enc| enc.finish(),
        );
        capped_ratio(len, packed.len())
    }
}

// ---------------------------------------------------------------------------
// xz / LZMA
// ---------------------------------------------------------------------------

static XZ_INFO: MetricInfo = MetricInfo {
    name: "lzma",
    description: "xz (LZMA2) preset-9 compression ratio",
};

pub struct XzRatio;

impl Metric for XzRatio {
    fn info(&self) -> &MetricInfo {
        &XZ_INFO
    }

    fn ratio(&self, bits: &Bitstring) -> f64 {
        use xz2::write::XzEncoder;

        let packed = bits.pack();
        let len = compressed_len(&packed, XzEncoder::new(Vec::new(), 9), |enc| enc.finish());
        capped_ratio(len, packed.len())
    }
}
