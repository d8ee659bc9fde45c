//! Operator-facing text written to stdout. Meant to be read, not parsed.

use splithello_traits::{Target, TrialOutcome, TrialReport, Verdict};
use std::io::{self, Write};

pub fn intro<W: Write + ?Sized>(
    out: &mut W,
    message_len: usize,
    target: &Target,
) -> io::Result<()> {
    writeln!(
        out,
        "About to send a large TLS ClientHello ({} bytes) to {}.",
        message_len,
        target.authority()
    )?;
    writeln!(out)?;
    writeln!(out, "The server should answer with a TLS ServerHello, a byte string")?;
    writeln!(out, "starting with b\"\\x16\\x03\\x03\". A closed connection or any other")?;
    writeln!(out, "reply means the server is misbehaving.")?;
    writeln!(out)
}

pub fn control_intro<W: Write + ?Sized>(out: &mut W, message_len: usize) -> io::Result<()> {
    writeln!(
        out,
        "Repeating the process with a smaller ClientHello ({} bytes).",
        message_len
    )?;
    writeln!(out, "This one normally fits in a single packet, so it shows whether the")?;
    writeln!(out, "failure follows the ClientHello's size or the number of reads it")?;
    writeln!(out, "is delivered in. (It is still smaller than what browsers send today;")?;
    writeln!(out, "no padding extension is added.)")?;
    writeln!(out)
}

pub fn trial_heading<W: Write + ?Sized>(out: &mut W, strategy: &str) -> io::Result<()> {
    writeln!(out, "Sending the ClientHello in {}:", strategy)
}

pub fn trial_result<W: Write + ?Sized>(out: &mut W, outcome: &TrialOutcome) -> io::Result<()> {
    writeln!(out, "{}", outcome)?;
    writeln!(out)
}

pub fn summary<W: Write + ?Sized>(out: &mut W, reports: &[TrialReport]) -> io::Result<()> {
    writeln!(out, "Summary:")?;
    for report in reports {
        writeln!(
            out,
            "  {} ClientHello ({} bytes), {}: {}",
            report.profile,
            report.message_len,
            report.strategy,
            report.outcome.verdict()
        )?;
    }
    if let Some(line) = diagnosis(reports) {
        writeln!(out)?;
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

/// Compares single-write and split-write results per message.
///
/// Reports are expected in pairs, single write first, as the engine produces them.
pub fn diagnosis(reports: &[TrialReport]) -> Option<&'static str> {
    let pairs: Vec<(Verdict, Verdict)> = reports
        .chunks(2)
        .filter(|pair| pair.len() == 2)
        .map(|pair| (pair[0].outcome.verdict(), pair[1].outcome.verdict()))
        .collect();
    if pairs.is_empty() {
        return None;
    }

    let split_breaks = pairs
        .iter()
        .any(|(single, split)| *single == Verdict::ServerHello && *split != Verdict::ServerHello);
    let all_hello = pairs
        .iter()
        .all(|(single, split)| *single == Verdict::ServerHello && *split == Verdict::ServerHello);

    if split_breaks {
        Some("The server answers a ClientHello sent in one write but not one split across writes: it does not reassemble fragmented ClientHellos.")
    } else if all_hello {
        Some("The server answered every ClientHello with a ServerHello.")
    } else {
        None
    }
}
