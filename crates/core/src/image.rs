//! Address space and MZ header model.
//!
//! An [`Image`] is the raw byte buffer of an executable, indexed by linear
//! address. Segment:offset pairs convert to linear addresses with the
//! real-mode rule `segment * 16 + offset`. The fixed-layout MZ header is
//! parsed by offset into [`MzHeader`]; none of its fields drive the core
//! algorithms except the derived entry address, which seeds exploration.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Size of the fixed MZ header in bytes.
pub const MZ_HEADER_LEN: usize = 28;

/// Error type for loading an image or parsing its header.
#[derive(Debug, Error)]
pub enum ImageError {
    /// The backing file could not be read at all. This is the only fatal
    /// failure in a session.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Fewer bytes than the fixed header needs.
    #[error("file too short for an MZ header ({0} bytes, need {MZ_HEADER_LEN})")]
    Truncated(usize),

    /// The first two bytes were not the `MZ` signature.
    #[error("bad MZ signature {0:02x?}")]
    BadSignature([u8; 2]),
}

/// Immutable byte buffer addressed linearly from zero.
#[derive(Debug, Clone)]
pub struct Image {
    data: Vec<u8>,
}

impl Image {
    /// Load an image from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ImageError> {
        let path = path.as_ref();
        let data = fs::read(path)
            .map_err(|source| ImageError::Io { path: path.to_path_buf(), source })?;
        Ok(Self { data })
    }

    /// Build an image from an in-memory buffer. Mostly useful in tests.
    pub fn from_bytes(data: Vec<u8>) -> Self {
        Self { data }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> u64 {
        self.data.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// View from `addr` to the end of the buffer.
    ///
    /// Out-of-range addresses yield an empty slice, never an error.
    pub fn slice_from(&self, addr: u64) -> &[u8] {
        let start = (addr.min(self.len())) as usize;
        &self.data[start..]
    }

    /// Real-mode segment:offset to linear address conversion. No masking;
    /// callers are expected to stay within the buffer.
    pub fn to_linear(segment: u64, offset: u64) -> u64 {
        segment * 16 + offset
    }
}

/// The fixed 28-byte header at the front of an MZ executable.
///
/// Treated as opaque read-only metadata; only [`MzHeader::entry_linear`]
/// feeds the core algorithms, as the default exploration seed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MzHeader {
    pub last_page_size: u16,
    pub page_count: u16,
    pub reloc_count: u16,
    pub header_paragraphs: u16,
    pub min_alloc: u16,
    pub max_alloc: u16,
    pub initial_ss: u16,
    pub initial_sp: u16,
    pub checksum: u16,
    pub entry_ip: u16,
    pub entry_cs: u16,
    pub reloc_table_offset: u16,
    pub overlay_number: u16,
}

impl MzHeader {
    /// Parse the header by fixed offsets from the front of `data`.
    pub fn parse(data: &[u8]) -> Result<Self, ImageError> {
        if data.len() < MZ_HEADER_LEN {
            return Err(ImageError::Truncated(data.len()));
        }
        if &data[..2] != b"MZ" {
            return Err(ImageError::BadSignature([data[0], data[1]]));
        }
        let field = |i: usize| u16::from_le_bytes([data[2 + 2 * i], data[3 + 2 * i]]);
        Ok(Self {
            last_page_size: field(0),
            page_count: field(1),
            reloc_count: field(2),
            header_paragraphs: field(3),
            min_alloc: field(4),
            max_alloc: field(5),
            initial_ss: field(6),
            initial_sp: field(7),
            checksum: field(8),
            entry_ip: field(9),
            entry_cs: field(10),
            reloc_table_offset: field(11),
            overlay_number: field(12),
        })
    }

    /// Linear address of the entry instruction (`CS*16 + IP`), used as the
    /// default exploration seed.
    pub fn entry_linear(&self) -> u64 {
        Image::to_linear(self.entry_cs as u64, self.entry_ip as u64)
    }
}

impl fmt::Display for MzHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "signature:           MZ")?;
        writeln!(f, "last page size:      {:#x}", self.last_page_size)?;
        writeln!(f, "page count:          {}", self.page_count)?;
        writeln!(f, "relocation count:    {}", self.reloc_count)?;
        writeln!(f, "header paragraphs:   {}", self.header_paragraphs)?;
        writeln!(f, "min extra alloc:     {:#x}", self.min_alloc)?;
        writeln!(f, "max extra alloc:     {:#x}", self.max_alloc)?;
        writeln!(f, "initial ss:sp:       {:#x}:{:#x}", self.initial_ss, self.initial_sp)?;
        writeln!(f, "checksum:            {:#x}", self.checksum)?;
        writeln!(f, "entry cs:ip:         {:#x}:{:#x}", self.entry_cs, self.entry_ip)?;
        writeln!(f, "entry linear:        {:#x}", self.entry_linear())?;
        writeln!(f, "reloc table offset:  {:#x}", self.reloc_table_offset)?;
        write!(f, "overlay number:      {}", self.overlay_number)
    }
}
