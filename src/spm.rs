//! Suffix–prefix match records and their three on-disk list formats
//! (§6). The SPM finder itself (an index walk over a suffix array) is an
//! external collaborator (§1(b)); this module only carries records
//! between it and the graph builder.

use std::io::{BufReader, Read, Write};

use crate::error::{Result, StrgraphError};

/// One suffix–prefix match between two reads, as produced by the (external)
/// SPM finder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpmRecord {
    pub suffix_read: u64,
    pub prefix_read: u64,
    pub length: u64,
    pub suffix_forward: bool,
    pub prefix_forward: bool,
}

/// An approximate suffix–prefix match: two differing overhang lengths and
/// an edit distance, rather than one exact shared length. Building the
/// string graph from these is out of scope (§1 Non-goals); this exists
/// purely so the ASCII format can round-trip lines produced by tools that
/// emit both kinds of record (§8 Scenario D).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApproximateSpm {
    pub suffix_read: u64,
    pub prefix_read: u64,
    pub suffix_len: u64,
    pub prefix_len: u64,
    pub edit_distance: u64,
    pub suffix_forward: bool,
    pub prefix_forward: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpmLine {
    Exact(SpmRecord),
    Approximate(ApproximateSpm),
}

const BIN32_HEADER: u8 = 0x02;
const BIN64_HEADER: u8 = 0x03;

fn parse_orientation(path: &str, token: &str) -> Result<bool> {
    match token {
        "+" => Ok(true),
        "-" => Ok(false),
        other => Err(StrgraphError::format(
            path,
            format!("expected '+' or '-', found {other:?}"),
        )),
    }
}

fn parse_u64(path: &str, token: &str) -> Result<u64> {
    token
        .parse()
        .map_err(|_| StrgraphError::format(path, format!("expected an integer, found {token:?}")))
}

/// Parses one ASCII SPM line (§6 and §8 Scenario D): the 5-token form is
/// an exact SPM, the 7-token form is an approximate match.
pub fn parse_ascii_line(path: &str, line: &str) -> Result<SpmLine> {
    let tokens: Vec<&str> = line.split_ascii_whitespace().collect();
    match tokens.as_slice() {
        [suf, suf_fwd, pre, pre_fwd, len] => Ok(SpmLine::Exact(SpmRecord {
            suffix_read: parse_u64(path, suf)?,
            prefix_read: parse_u64(path, pre)?,
            length: parse_u64(path, len)?,
            suffix_forward: parse_orientation(path, suf_fwd)?,
            prefix_forward: parse_orientation(path, pre_fwd)?,
        })),
        [suf, suf_fwd, pre, pre_fwd, suf_len, pre_len, edist] => {
            Ok(SpmLine::Approximate(ApproximateSpm {
                suffix_read: parse_u64(path, suf)?,
                prefix_read: parse_u64(path, pre)?,
                suffix_len: parse_u64(path, suf_len)?,
                prefix_len: parse_u64(path, pre_len)?,
                edit_distance: parse_u64(path, edist)?,
                suffix_forward: parse_orientation(path, suf_fwd)?,
                prefix_forward: parse_orientation(path, pre_fwd)?,
            }))
        }
        _ => Err(StrgraphError::format(
            path,
            format!("expected 5 or 7 whitespace-separated tokens, found {}", tokens.len()),
        )),
    }
}

pub fn format_ascii_line(spm: &SpmRecord) -> String {
    format!(
        "{} {} {} {} {}\n",
        spm.suffix_read,
        if spm.suffix_forward { '+' } else { '-' },
        spm.prefix_read,
        if spm.prefix_forward { '+' } else { '-' },
        spm.length
    )
}

fn pack(length: u64, suffix_forward: bool, prefix_forward: bool) -> u64 {
    (length << 2) | ((suffix_forward as u64) << 1) | (prefix_forward as u64)
}

fn unpack(packed: u64) -> (u64, bool, bool) {
    (packed >> 2, (packed >> 1) & 1 != 0, packed & 1 != 0)
}

/// Writes a list of exact SPM records to `out` in one of the three
/// formats.
pub fn write_spm_list(path: &str, spms: &[SpmRecord], format: SpmFormat, mut out: impl Write) -> Result<()> {
    match format {
        SpmFormat::Ascii => {
            for spm in spms {
                out.write_all(format_ascii_line(spm).as_bytes())?;
            }
        }
        SpmFormat::Binary32 => {
            out.write_all(&[BIN32_HEADER])?;
            for spm in spms {
                if spm.suffix_read > u32::MAX as u64 || spm.prefix_read > u32::MAX as u64 {
                    return Err(StrgraphError::format(path, "read number exceeds u32 range for 32-bit SPM list"));
                }
                out.write_all(&(spm.suffix_read as u32).to_le_bytes())?;
                out.write_all(&(spm.prefix_read as u32).to_le_bytes())?;
                let packed = pack(spm.length, spm.suffix_forward, spm.prefix_forward);
                out.write_all(&(packed as u32).to_le_bytes())?;
            }
        }
        SpmFormat::Binary64 => {
            out.write_all(&[BIN64_HEADER])?;
            for spm in spms {
                out.write_all(&spm.suffix_read.to_le_bytes())?;
                out.write_all(&spm.prefix_read.to_le_bytes())?;
                let packed = pack(spm.length, spm.suffix_forward, spm.prefix_forward);
                out.write_all(&packed.to_le_bytes())?;
            }
        }
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpmFormat {
    Ascii,
    Binary32,
    Binary64,
}

/// Reads an SPM list, auto-detecting the format from the first byte
/// (§6): `0x02`/`0x03` select the binary variants, anything else is
/// treated as ASCII.
pub fn read_spm_list(path: &str, mut input: impl Read) -> Result<Vec<SpmRecord>> {
    let mut first = [0u8; 1];
    let n = input.read(&mut first)?;
    if n == 0 {
        return Ok(Vec::new());
    }
    match first[0] {
        BIN32_HEADER => read_binary(path, input, 4),
        BIN64_HEADER => read_binary(path, input, 8),
        other => {
            let mut rest = String::new();
            input.read_to_string(&mut rest)?;
            let mut records = Vec::new();
            let first_line = format!("{}{}", other as char, rest.lines().next().unwrap_or(""));
            for (i, line) in std::iter::once(first_line.as_str())
                .chain(rest.lines().skip(1))
                .enumerate()
            {
                if line.trim().is_empty() {
                    continue;
                }
                match parse_ascii_line(path, line)? {
                    SpmLine::Exact(spm) => records.push(spm),
                    SpmLine::Approximate(_) => {
                        return Err(StrgraphError::format(
                            path,
                            format!("line {i}: approximate SPM records are not consumable by graph construction"),
                        ));
                    }
                }
            }
            Ok(records)
        }
    }
}

fn read_binary(path: &str, mut input: impl Read, word_bytes: usize) -> Result<Vec<SpmRecord>> {
    let mut records = Vec::new();
    loop {
        let mut suf_buf = vec![0u8; word_bytes];
        let read = input.read(&mut suf_buf)?;
        if read == 0 {
            break;
        }
        if read != word_bytes {
            return Err(StrgraphError::format(path, "truncated SPM record"));
        }
        let mut pre_buf = vec![0u8; word_bytes];
        input
            .read_exact(&mut pre_buf)
            .map_err(|_| StrgraphError::format(path, "truncated SPM record"))?;
        let mut packed_buf = vec![0u8; word_bytes];
        input
            .read_exact(&mut packed_buf)
            .map_err(|_| StrgraphError::format(path, "truncated SPM record"))?;
        let (suffix_read, prefix_read, packed) = if word_bytes == 4 {
            (
                u32::from_le_bytes(suf_buf.try_into().unwrap()) as u64,
                u32::from_le_bytes(pre_buf.try_into().unwrap()) as u64,
                u32::from_le_bytes(packed_buf.try_into().unwrap()) as u64,
            )
        } else {
            (
                u64::from_le_bytes(suf_buf.try_into().unwrap()),
                u64::from_le_bytes(pre_buf.try_into().unwrap()),
                u64::from_le_bytes(packed_buf.try_into().unwrap()),
            )
        };
        let (length, suffix_forward, prefix_forward) = unpack(packed);
        records.push(SpmRecord {
            suffix_read,
            prefix_read,
            length,
            suffix_forward,
            prefix_forward,
        });
    }
    Ok(records)
}

/// Reads an SPM list from a buffered line source; a thin convenience used
/// by the builder's multi-file loader (§4.2).
pub fn read_spm_list_lines(path: &str, input: impl Read) -> Result<Vec<SpmRecord>> {
    read_spm_list(path, BufReader::new(input))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_d_exact_line() {
        let SpmLine::Exact(spm) = parse_ascii_line("mem", "1 + 2 - 3").unwrap() else {
            panic!("expected an exact SPM");
        };
        assert_eq!(
            spm,
            SpmRecord {
                suffix_read: 1,
                prefix_read: 2,
                length: 3,
                suffix_forward: true,
                prefix_forward: false,
            }
        );
    }

    #[test]
    fn scenario_d_approximate_line() {
        let SpmLine::Approximate(spm) = parse_ascii_line("mem", "4 + 5 + 6 7 1").unwrap() else {
            panic!("expected an approximate SPM");
        };
        assert_eq!(
            spm,
            ApproximateSpm {
                suffix_read: 4,
                prefix_read: 5,
                suffix_len: 6,
                prefix_len: 7,
                edit_distance: 1,
                suffix_forward: true,
                prefix_forward: true,
            }
        );
    }

    #[test]
    fn scenario_d_malformed_line() {
        assert!(parse_ascii_line("mem", "1 + 2").is_err());
        assert!(parse_ascii_line("mem", "1 x 2 + 3").is_err());
    }

    fn sample() -> Vec<SpmRecord> {
        vec![
            SpmRecord { suffix_read: 0, prefix_read: 1, length: 10, suffix_forward: true, prefix_forward: true },
            SpmRecord { suffix_read: 7, prefix_read: 2, length: 255, suffix_forward: false, prefix_forward: true },
        ]
    }

    #[test]
    fn ascii_round_trip() {
        let spms = sample();
        let mut buf = Vec::new();
        write_spm_list("mem", &spms, SpmFormat::Ascii, &mut buf).unwrap();
        let parsed = read_spm_list("mem", &buf[..]).unwrap();
        assert_eq!(parsed, spms);
    }

    #[test]
    fn binary32_round_trip() {
        let spms = sample();
        let mut buf = Vec::new();
        write_spm_list("mem", &spms, SpmFormat::Binary32, &mut buf).unwrap();
        let parsed = read_spm_list("mem", &buf[..]).unwrap();
        assert_eq!(parsed, spms);
    }

    #[test]
    fn binary64_round_trip() {
        let spms = sample();
        let mut buf = Vec::new();
        write_spm_list("mem", &spms, SpmFormat::Binary64, &mut buf).unwrap();
        let parsed = read_spm_list("mem", &buf[..]).unwrap();
        assert_eq!(parsed, spms);
    }
}
