//! The per-byte decode driver.
//!
//! Feeding works like the receiver sends: one byte at a time, sentences
//! framed by `$` and `\r\n`. Field text is dispatched to the
//! kind-specific decoders as each delimiter closes it, the checksum
//! folds alongside, and line ends run validation plus the completion
//! check over the required-kind mask.

use log::{debug, trace, warn};
use tinyvec::ArrayVec;

use super::sentences::{self, GsvCycle};
use super::{
    fix::FixRecord, NmeaChecksum, NmeaError, SentenceBuf, SentenceKind, SentenceMask,
    FIELD_BUF_SIZE,
};

pub struct NmeaParser {
    required: SentenceMask,
    seen: SentenceMask,
    fix: FixRecord,
    cycle: GsvCycle,
    kind: SentenceKind,
    field: ArrayVec<[u8; FIELD_BUF_SIZE]>,
    index: u8,
    line: SentenceBuf,
    sum: NmeaChecksum,
    in_checksum: bool,
    // Set by `$`, cleared at line end; everything else is inert outside it.
    active: bool,
}

impl NmeaParser {
    /// A fix emits once every kind in `required` has reported.
    pub fn new(required: SentenceMask) -> Self {
        Self {
            required,
            seen: SentenceMask::empty(),
            fix: FixRecord::default(),
            cycle: GsvCycle::default(),
            kind: SentenceKind::Unknown,
            field: ArrayVec::new(),
            index: 0,
            line: SentenceBuf::new(),
            sum: NmeaChecksum::new(),
            in_checksum: false,
            active: false,
        }
    }

    /// The record as accumulated so far, between events.
    pub fn fix(&self) -> &FixRecord {
        &self.fix
    }

    pub fn process_byte(&mut self, b: u8) -> Option<Result<Event, NmeaError>> {
        match b {
            b'$' => {
                self.active = true;
                self.kind = SentenceKind::Unknown;
                self.cycle = GsvCycle::default();
                self.sum = NmeaChecksum::new();
                self.in_checksum = false;
                self.index = 0;
                self.field.clear();
                let _ = self.field.try_push(b);
                self.line = SentenceBuf::new();
                let _ = self.line.try_push(b);
                None
            }
            b',' if self.active => {
                self.sum = self.sum.next(b);
                let _ = self.line.try_push(b);
                self.close_field();
                None
            }
            b'*' if self.active => {
                let _ = self.line.try_push(b);
                self.close_field();
                self.in_checksum = true;
                None
            }
            b'\r' if self.active => self.finish_line(),
            _ if self.active => {
                if !self.in_checksum {
                    self.sum = self.sum.next(b);
                }
                let _ = self.line.try_push(b);
                let _ = self.field.try_push(b);
                None
            }
            _ => None,
        }
    }

    /// Drives `process_byte` over a transport buffer. The iterator ends
    /// at the buffer's end or at the first NUL byte, whichever comes
    /// first; bytes past the NUL stay unconsumed.
    pub fn decode<'a>(&'a mut self, buf: &'a [u8]) -> Events<'a> {
        Events { parser: self, buf }
    }

    fn close_field(&mut self) {
        if self.index == 0 {
            self.kind = SentenceKind::identify(&self.field);
        } else {
            sentences::decode_field(
                self.kind,
                &mut self.fix,
                &mut self.cycle,
                self.index,
                &self.field,
            );
        }
        self.field.clear();
        self.index = self.index.saturating_add(1);
    }

    fn finish_line(&mut self) -> Option<Result<Event, NmeaError>> {
        self.active = false;

        // The field buffer now holds whatever followed the `*`.
        let expect = self.sum.0;
        let saw = sentences::read_hex(&self.field);
        let matched = self.sum == saw;
        if !matched {
            warn!("checksum mismatch: expected {:02x}, saw {:02x}", expect, saw);
        }

        // A mismatch unwinds nothing: the fields were applied as they
        // were parsed, and the kind still counts toward completion.
        match self.kind {
            SentenceKind::Unknown => {}
            // A GSV group only counts once its last message arrives.
            SentenceKind::Gsv if self.cycle.msg != self.cycle.total => {}
            kind => self.seen |= kind.mask(),
        }

        let event = if self.seen.contains(self.required) {
            self.seen = SentenceMask::empty();
            debug!("required sentences complete, emitting fix");
            Some(Event::FixReady(self.fix))
        } else if self.kind == SentenceKind::Unknown {
            trace!("unrecognized sentence");
            Some(Event::UnknownSentence(self.line))
        } else {
            None
        };

        match event {
            Some(event) => Some(Ok(event)),
            None if !matched => Some(Err(NmeaError::ChecksumMismatch { expect, saw })),
            None => None,
        }
    }
}

impl Default for NmeaParser {
    fn default() -> Self {
        Self::new(SentenceMask::all())
    }
}

#[derive(Debug, Copy, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Snapshot of the record, taken when the required kinds complete.
    FixReady(FixRecord),
    /// Raw text of a line whose type token matched no known kind.
    UnknownSentence(SentenceBuf),
}

/// Iterator returned by [`NmeaParser::decode`].
pub struct Events<'a> {
    parser: &'a mut NmeaParser,
    buf: &'a [u8],
}

impl Iterator for Events<'_> {
    type Item = Result<Event, NmeaError>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((&b, rest)) = self.buf.split_first() {
            if b == 0 {
                return None;
            }
            self.buf = rest;
            if let Some(out) = self.parser.process_byte(b) {
                return Some(out);
            }
        }
        None
    }
}
