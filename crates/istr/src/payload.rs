//! Payload Module - Interned Byte Payloads and Handles
//!
//! A [`Payload`] is the owned, immutable byte content behind an interned
//! handle. The buffer carries one trailing zero byte past the logical
//! length so C-style consumers can borrow a terminated view; the logical
//! length is stored explicitly, so embedded zero bytes in the content are
//! legal and length queries never scan.
//!
//! [`Istr`] is the public handle: a shared pointer to a payload. Handle
//! identity is payload identity, so equality and hashing go through the
//! pointer rather than the bytes. Two handles compare equal exactly when
//! they came from the same pool and intern calls with identical content.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

/// Owned, immutable interned content
///
/// The byte buffer is always `len + 1` bytes long with a zero terminator
/// in the final position. The terminator is storage layout, not content:
/// [`Payload::logical`] excludes it, and `len` never counts it.
pub(crate) struct Payload {
    /// Logical content length, excluding the terminator
    len: usize,
    /// Content bytes plus one trailing zero
    bytes: Box<[u8]>,
}

impl Payload {
    /// Allocate a payload holding a copy of `content`
    ///
    /// The allocation happens before any table state is touched, so an
    /// allocation fault (which aborts the process) can never leave a
    /// pool half-updated.
    pub(crate) fn from_bytes(content: &[u8]) -> Rc<Payload> {
        let mut bytes = Vec::with_capacity(content.len() + 1);
        bytes.extend_from_slice(content);
        bytes.push(0);
        Rc::new(Payload {
            len: content.len(),
            bytes: bytes.into_boxed_slice(),
        })
    }

    /// Logical content, excluding the trailing terminator
    pub(crate) fn logical(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    /// Logical content length
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Content plus the trailing zero terminator
    pub(crate) fn with_terminator(&self) -> &[u8] {
        &self.bytes
    }
}

/// Canonical handle to interned content
///
/// Cloning an `Istr` is a reference-count bump; the underlying payload is
/// shared. While any clone is alive the content stays valid; once every
/// clone (including the pool's pinning ring) is dropped, the pool's weak
/// slot goes dead and the payload is reclaimed.
///
/// # Identity
///
/// `Eq` and `Hash` are pointer-based. Within one pool, content equality
/// and handle equality coincide; handles from different pools never
/// compare equal even for identical bytes.
///
/// # Examples
///
/// ```rust
/// use istr::Pool;
///
/// let mut pool = Pool::new();
/// let a = pool.intern_str("ticket");
/// let b = pool.intern_str("ticket");
/// assert_eq!(a, b);
/// assert_eq!(a.as_str(), Some("ticket"));
/// ```
#[derive(Clone)]
pub struct Istr(Rc<Payload>);

impl Istr {
    pub(crate) fn from_rc(payload: Rc<Payload>) -> Self {
        Istr(payload)
    }

    /// Content length in bytes
    ///
    /// Stored at intern time; this is O(1) and unaffected by embedded
    /// zero bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the content is zero bytes long
    pub fn is_empty(&self) -> bool {
        self.0.len() == 0
    }

    /// The interned content
    pub fn as_bytes(&self) -> &[u8] {
        self.0.logical()
    }

    /// The interned content plus a trailing zero byte
    ///
    /// Useful when handing the buffer to APIs that expect termination.
    /// Note that content containing embedded zeros is still returned in
    /// full; only the final byte is the terminator.
    pub fn as_bytes_with_nul(&self) -> &[u8] {
        self.0.with_terminator()
    }

    /// The content as UTF-8, if it is valid UTF-8
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(self.as_bytes()).ok()
    }

    /// True if both handles refer to the same interned payload
    ///
    /// Equivalent to `==`; provided for call sites that want the
    /// pointer-comparison reading to be explicit.
    pub fn ptr_eq(&self, other: &Istr) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for Istr {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Istr {}

impl Hash for Istr {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (Rc::as_ptr(&self.0) as usize).hash(state);
    }
}

impl fmt::Debug for Istr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Istr({:?})", String::from_utf8_lossy(self.as_bytes()))
    }
}

impl AsRef<[u8]> for Istr {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}
