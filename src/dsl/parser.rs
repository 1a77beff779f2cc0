//! Parser for circuit definition files.

use std::collections::HashSet;
use std::io::{self, Write};

use tracing::{debug, info, warn};

use super::diagnostics::{Diagnostic, ErrorKind, Recovery, RecoveryPlan, SyntaxError};
use super::scanner::{Keyword, Scanner, Symbol, TokenKind};
use super::ParseOptions;
use crate::circuit::{ConnectionError, DeviceError, MonitorError, NetworkBuilder};
use crate::error::{LogsimError, Result};
use crate::names::NameId;

/// The three top-level blocks of a definition file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Devices,
    Connections,
    Monitor,
}

impl Section {
    const ALL: [Section; 3] = [Section::Devices, Section::Connections, Section::Monitor];

    fn from_keyword(keyword: Keyword) -> Option<Self> {
        match keyword {
            Keyword::Devices => Some(Self::Devices),
            Keyword::Connections => Some(Self::Connections),
            Keyword::Monitor => Some(Self::Monitor),
            Keyword::End | Keyword::MainEnd => None,
        }
    }

    fn keyword(self) -> Keyword {
        match self {
            Self::Devices => Keyword::Devices,
            Self::Connections => Keyword::Connections,
            Self::Monitor => Keyword::Monitor,
        }
    }

    fn index(self) -> usize {
        self as usize
    }

    /// Reported when the section keyword is missing.
    fn missing_error(self) -> SyntaxError {
        match self {
            Self::Devices => SyntaxError::ExpectDevices,
            Self::Connections => SyntaxError::ExpectConnect,
            Self::Monitor => SyntaxError::ExpectMonitor,
        }
    }

    /// Reported when the section keyword appears a second time.
    fn duplicate_error(self) -> SyntaxError {
        match self {
            Self::Devices => SyntaxError::ExtraDevices,
            Self::Connections => SyntaxError::ExtraConnect,
            Self::Monitor => SyntaxError::ExtraMonitor,
        }
    }

    /// Reported when a declaration does not start with a name.
    fn stray_symbol_error(self) -> SyntaxError {
        match self {
            Self::Devices => SyntaxError::InvalidDeviceType,
            Self::Connections | Self::Monitor => SyntaxError::InvalidDeviceName,
        }
    }
}

/// Recursive-descent parser for circuit definition files.
///
/// The parser reads one symbol at a time and never backtracks. Each
/// well-formed declaration is handed to the [`NetworkBuilder`] as soon as its
/// closing `;` is read. Errors are written to the output sink and parsing
/// resumes at the next safe symbol, so one pass reports every independent
/// problem in the file.
///
/// A parser is single use: call [`Parser::parse_network`] once.
pub struct Parser<'a, B: NetworkBuilder, W: Write> {
    scanner: Scanner<'a>,
    builder: &'a mut B,
    out: W,
    options: ParseOptions,
    current: Symbol,
    /// Set when a section is entered, not when it is closed
    section_done: [bool; 3],
    error_count: u32,
    /// Set once an error leaves the parse out of step with the input
    build_blocked: bool,
    /// Devices whose declaration the builder rejected
    rejected: HashSet<NameId>,
    diagnostics: Vec<Diagnostic>,
    output_error: Option<io::Error>,
}

impl<'a, B: NetworkBuilder, W: Write> Parser<'a, B, W> {
    /// Create a parser reading from `scanner`, building into `builder` and
    /// writing diagnostics to `out`.
    pub fn new(scanner: Scanner<'a>, builder: &'a mut B, out: W, options: ParseOptions) -> Self {
        Self {
            scanner,
            builder,
            out,
            options,
            current: Symbol {
                kind: TokenKind::Eof,
                line: 1,
                column: 1,
            },
            section_done: [false; 3],
            error_count: 0,
            build_blocked: false,
            rejected: HashSet::new(),
            diagnostics: Vec::new(),
            output_error: None,
        }
    }

    /// Parse the whole file.
    ///
    /// Returns `true` if no lexical, syntax, structural or semantic error
    /// was found.
    pub fn parse_network(&mut self) -> bool {
        self.next_symbol();

        for section in Section::ALL {
            if !self.current.is_keyword(section.keyword()) {
                self.syntax_error(section.missing_error());
            }
            if self.current.is_keyword(section.keyword()) {
                self.next_symbol();
                self.parse_section(section);
            }
        }

        if !self.current.is_keyword(Keyword::MainEnd) {
            self.syntax_error(SyntaxError::NoMainEnd);
        }

        info!(errors = self.error_count, "parse finished");
        self.error_count == 0
    }

    /// Number of errors reported so far.
    pub fn error_count(&self) -> u32 {
        self.error_count
    }

    /// Every diagnostic reported so far, in order.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// The first failure to write to the output sink, if any.
    pub fn output_error(&self) -> Option<&io::Error> {
        self.output_error.as_ref()
    }

    /// Fail if any diagnostic could not be written to the output sink.
    pub fn check_output(&mut self) -> Result<()> {
        match self.output_error.take() {
            Some(source) => Err(LogsimError::DiagnosticOutput { source }),
            None => Ok(()),
        }
    }

    fn next_symbol(&mut self) {
        self.current = self.scanner.get_symbol();
        if self.current.kind == TokenKind::UnterminatedComment {
            self.syntax_error(SyntaxError::UnterminatedComment);
            self.current = self.scanner.get_symbol();
        }
    }

    fn parse_section(&mut self, section: Section) {
        self.section_done[section.index()] = true;
        debug!(?section, line = self.current.line, "entering section");

        loop {
            while let TokenKind::Name(first) = self.current.kind {
                match section {
                    Section::Devices => self.parse_device(first),
                    Section::Connections => self.parse_connection(first),
                    Section::Monitor => self.parse_monitor(first),
                };
            }

            match self.current.kind {
                TokenKind::Keyword(Keyword::End) => {
                    if section == Section::Connections
                        && self.error_count == 0
                        && !self.builder.check_network()
                    {
                        self.syntax_error(SyntaxError::IncompleteNetwork);
                    }
                    self.next_symbol();
                    return;
                }
                TokenKind::Keyword(_) | TokenKind::Eof => {
                    self.syntax_error(SyntaxError::NoEnd);
                    return;
                }
                TokenKind::Semicolon => self.extra_semicolons(),
                _ => self.syntax_error(section.stray_symbol_error()),
            }
        }
    }

    /// `NAME [ "," NUMBER ] "=" NAME ";"`, starting on the device type.
    fn parse_device(&mut self, kind: NameId) -> Option<()> {
        let kind_symbol = self.current;
        self.next_symbol();

        let qualifier = if self.current.kind == TokenKind::Comma {
            self.next_symbol();
            Some(self.expect_number(SyntaxError::NoNumber)?)
        } else {
            None
        };
        self.expect(TokenKind::Equals, SyntaxError::NoEquals)?;
        let (device, device_symbol) = self.expect_name(SyntaxError::InvalidDeviceName)?;
        self.expect(TokenKind::Semicolon, SyntaxError::NoSemicolon)?;

        if self.build_blocked {
            return Some(());
        }
        let result = self
            .builder
            .make_device(device, kind, qualifier.map(|(value, _)| value));
        let error = match result {
            Ok(()) => {
                self.rejected.remove(&device);
                return Some(());
            }
            Err(error) => error,
        };
        let anchor = match error {
            // The device already declared under this name stays usable.
            DeviceError::DevicePresent => device_symbol,
            DeviceError::BadDevice | DeviceError::NoQualifier => kind_symbol,
            DeviceError::QualifierPresent | DeviceError::InvalidQualifier => {
                qualifier.map_or(kind_symbol, |(_, symbol)| symbol)
            }
        };
        if error != DeviceError::DevicePresent {
            self.rejected.insert(device);
        }
        self.semantic_error(error.into(), anchor);
        Some(())
    }

    /// `NAME [ "." NAME ] "-" NAME "." NAME ";"`, starting on the output device.
    fn parse_connection(&mut self, out_device: NameId) -> Option<()> {
        let out_device_symbol = self.current;
        self.next_symbol();

        let out_port = if self.current.kind == TokenKind::Dot {
            self.next_symbol();
            Some(self.expect_name(SyntaxError::InvalidOutputLabel)?)
        } else {
            None
        };
        self.expect(TokenKind::Dash, SyntaxError::NoDash)?;
        let (in_device, in_device_symbol) = self.expect_name(SyntaxError::InvalidDeviceName)?;
        self.expect(TokenKind::Dot, SyntaxError::NoDot)?;
        let (in_port, in_port_symbol) = self.expect_name(SyntaxError::InvalidInputLabel)?;
        self.expect(TokenKind::Semicolon, SyntaxError::NoSemicolon)?;

        if self.build_blocked || self.references_rejected(&[out_device, in_device]) {
            return Some(());
        }
        let result = self.builder.make_connection(
            out_device,
            out_port.map(|(id, _)| id),
            in_device,
            Some(in_port),
        );
        if let Err(error) = result {
            let anchor = match error {
                ConnectionError::OutputDeviceAbsent | ConnectionError::PortAbsent => {
                    out_device_symbol
                }
                ConnectionError::InputDeviceAbsent | ConnectionError::OutputToOutput => {
                    in_device_symbol
                }
                ConnectionError::InputConnected => in_port_symbol,
                ConnectionError::InputToInput => {
                    out_port.map_or(out_device_symbol, |(_, symbol)| symbol)
                }
            };
            self.semantic_error(error.into(), anchor);
        }
        Some(())
    }

    /// `NAME [ "." NAME ] ";"`, starting on the device.
    fn parse_monitor(&mut self, device: NameId) -> Option<()> {
        let device_symbol = self.current;
        self.next_symbol();

        let port = if self.current.kind == TokenKind::Dot {
            self.next_symbol();
            Some(self.expect_name(SyntaxError::InvalidOutputLabel)?)
        } else {
            None
        };
        self.expect(TokenKind::Semicolon, SyntaxError::NoSemicolon)?;

        if self.build_blocked || self.references_rejected(&[device]) {
            return Some(());
        }
        if let Err(error) = self.builder.make_monitor(device, port.map(|(id, _)| id)) {
            let anchor = match error {
                MonitorError::NotOutput
                | MonitorError::MonitorPresent
                | MonitorError::DeviceAbsent => device_symbol,
            };
            self.semantic_error(error.into(), anchor);
        }
        Some(())
    }

    /// Whether any of `devices` was already reported as rejected.
    ///
    /// Declarations naming such a device are skipped so one bad device line
    /// yields one diagnostic.
    fn references_rejected(&self, devices: &[NameId]) -> bool {
        let rejected = devices.iter().any(|id| self.rejected.contains(id));
        if rejected {
            debug!(line = self.current.line, "skipping declaration naming a rejected device");
        }
        rejected
    }

    /// Consume a symbol of `kind`, or report `error` and resynchronize.
    fn expect(&mut self, kind: TokenKind, error: SyntaxError) -> Option<Symbol> {
        if self.current.kind == kind {
            let symbol = self.current;
            self.next_symbol();
            Some(symbol)
        } else {
            self.syntax_error(error);
            None
        }
    }

    fn expect_name(&mut self, error: SyntaxError) -> Option<(NameId, Symbol)> {
        match self.current.kind {
            TokenKind::Name(id) => {
                let symbol = self.current;
                self.next_symbol();
                Some((id, symbol))
            }
            _ => {
                self.syntax_error(error);
                None
            }
        }
    }

    fn expect_number(&mut self, error: SyntaxError) -> Option<(i64, Symbol)> {
        match self.current.kind {
            TokenKind::Number(value) => {
                let symbol = self.current;
                self.next_symbol();
                Some((value, symbol))
            }
            _ => {
                self.syntax_error(error);
                None
            }
        }
    }

    fn extra_semicolons(&mut self) {
        while self.current.kind == TokenKind::Semicolon {
            self.syntax_error(SyntaxError::ExtraSemicolon);
            self.next_symbol();
        }
    }

    /// Skip to just past the next `;`, or to the section's `END`.
    fn resync_in_block(&mut self) {
        loop {
            match self.current.kind {
                TokenKind::Eof | TokenKind::Keyword(Keyword::End) => return,
                TokenKind::Semicolon => {
                    self.next_symbol();
                    self.extra_semicolons();
                    return;
                }
                _ => self.next_symbol(),
            }
        }
    }

    /// Skip to a section keyword not yet entered, or to `MAIN_END`.
    ///
    /// Keywords of sections already entered are reported and skipped.
    fn resync_out_of_block(&mut self) {
        loop {
            match self.current.kind {
                TokenKind::Eof | TokenKind::Keyword(Keyword::MainEnd) => return,
                TokenKind::Keyword(keyword) => {
                    if let Some(section) = Section::from_keyword(keyword) {
                        if !self.section_done[section.index()] {
                            return;
                        }
                        self.report(section.duplicate_error());
                    }
                }
                _ => {}
            }
            self.next_symbol();
        }
    }

    /// Record a parser error and resynchronize as its recovery plan says.
    fn syntax_error(&mut self, error: SyntaxError) {
        let plan = self.report(error);
        if plan.advance {
            self.next_symbol();
        }
        match plan.recovery {
            Recovery::None => return,
            Recovery::InBlock => self.resync_in_block(),
            Recovery::OutOfBlock => self.resync_out_of_block(),
        }
        debug!(
            recovery = ?plan.recovery,
            line = self.current.line,
            column = self.current.column,
            "resynchronized"
        );
    }

    fn report(&mut self, error: SyntaxError) -> RecoveryPlan {
        let plan = error.recovery();
        if error.blocks_building() {
            self.build_blocked = true;
        }
        self.record(error.into(), self.current, plan.caret);
        plan
    }

    /// Record an error from the builder, anchored at the symbol that caused it.
    fn semantic_error(&mut self, kind: ErrorKind, anchor: Symbol) {
        self.record(kind, anchor, true);
    }

    fn record(&mut self, kind: ErrorKind, anchor: Symbol, caret: bool) {
        self.error_count += 1;
        let diagnostic = Diagnostic {
            kind,
            line: anchor.line,
            column: anchor.column,
        };
        debug!(%diagnostic, errors = self.error_count, "diagnostic reported");

        let caret = caret && self.options.inline_locations;
        if let Err(err) = self.write_diagnostic(&diagnostic, &anchor, caret) {
            warn!(error = %err, "failed to write diagnostic");
            if self.output_error.is_none() {
                self.output_error = Some(err);
            }
        }
        self.diagnostics.push(diagnostic);
    }

    fn write_diagnostic(
        &mut self,
        diagnostic: &Diagnostic,
        anchor: &Symbol,
        caret: bool,
    ) -> io::Result<()> {
        writeln!(self.out, "{}", diagnostic)?;
        if caret {
            self.scanner.print_location(anchor, &mut self.out)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::Circuit;
    use crate::names::Names;

    struct Outcome {
        ok: bool,
        errors: Vec<ErrorKind>,
        diagnostics: Vec<Diagnostic>,
        output: String,
        circuit: Circuit,
    }

    fn run_with(source: &str, options: ParseOptions) -> Outcome {
        let mut names = Names::new();
        let mut circuit = Circuit::new(&mut names);
        let mut out = Vec::new();

        let scanner = Scanner::new(source, &mut names);
        let mut parser = Parser::new(scanner, &mut circuit, &mut out, options);
        let ok = parser.parse_network();
        let diagnostics = parser.diagnostics().to_vec();
        assert_eq!(parser.error_count() as usize, diagnostics.len());
        assert!(parser.output_error().is_none());
        drop(parser);

        Outcome {
            ok,
            errors: diagnostics.iter().map(|d| d.kind).collect(),
            diagnostics,
            output: String::from_utf8(out).unwrap(),
            circuit,
        }
    }

    fn run(source: &str) -> Outcome {
        run_with(source, ParseOptions::default())
    }

    fn syntax(errors: &[SyntaxError]) -> Vec<ErrorKind> {
        errors.iter().map(|&e| ErrorKind::Syntax(e)).collect()
    }

    const VALID: &str = "\
DEVICES
  SWITCH, 0 = SW1;
  SWITCH, 1 = SW2;
  NAND, 2 = G1;
END
CONNECTIONS
  SW1 - G1.I1;
  SW2 - G1.I2;
END
MONITOR
  G1;
  SW1;
END
MAIN_END
";

    #[test]
    fn test_valid_file() {
        let outcome = run(VALID);
        assert!(outcome.ok);
        assert!(outcome.errors.is_empty());
        assert!(outcome.output.is_empty());
        assert_eq!(outcome.circuit.devices().len(), 3);
        assert_eq!(outcome.circuit.connection_count(), 2);
        assert_eq!(outcome.circuit.monitors().len(), 2);
    }

    #[test]
    fn test_missing_semicolon_suppresses_building() {
        let outcome = run(&VALID.replace("SW1;\n  SWITCH", "SW1\n  SWITCH"));
        assert!(!outcome.ok);
        assert_eq!(outcome.errors, syntax(&[SyntaxError::NoSemicolon]));
        assert_eq!(
            (outcome.diagnostics[0].line, outcome.diagnostics[0].column),
            (3, 3)
        );
        // Nothing after the error is built.
        assert_eq!(outcome.circuit.devices().len(), 0);
        assert_eq!(outcome.circuit.connection_count(), 0);
    }

    #[test]
    fn test_extra_semicolon() {
        let outcome = run(&VALID.replace("SW1;\n  SWITCH", "SW1;;\n  SWITCH"));
        assert!(!outcome.ok);
        assert_eq!(outcome.errors, syntax(&[SyntaxError::ExtraSemicolon]));
        assert_eq!(outcome.circuit.devices().len(), 3);
        assert_eq!(outcome.circuit.connection_count(), 2);
        assert_eq!(outcome.circuit.monitors().len(), 2);
    }

    #[test]
    fn test_each_extra_semicolon_reported() {
        let outcome = run(&VALID.replace("SW2 - G1.I2;", "SW2 - G1.I2;;;"));
        assert_eq!(
            outcome.errors,
            syntax(&[SyntaxError::ExtraSemicolon, SyntaxError::ExtraSemicolon])
        );
        assert_eq!(outcome.circuit.monitors().len(), 2);
    }

    #[test]
    fn test_missing_connections_keyword_still_parses_monitors() {
        let source = "DEVICES SWITCH, 0 = SW1; END\nMONITOR SW1 SW1; END\nMAIN_END";
        let outcome = run(source);
        assert_eq!(
            outcome.errors,
            syntax(&[SyntaxError::ExpectConnect, SyntaxError::NoSemicolon])
        );
        assert_eq!(
            (outcome.diagnostics[1].line, outcome.diagnostics[1].column),
            (2, 13)
        );
    }

    #[test]
    fn test_missing_devices_keyword() {
        let source = "SWITCH, 0 = SW1; END\nCONNECTIONS END\nMONITOR END\nMAIN_END";
        let outcome = run(source);
        assert_eq!(outcome.errors, syntax(&[SyntaxError::ExpectDevices]));
        assert_eq!(outcome.circuit.devices().len(), 0);
    }

    #[test]
    fn test_duplicate_device_is_semantic() {
        let source = VALID.replace("SWITCH, 1 = SW2;", "SWITCH, 1 = SW1;\n  SWITCH, 1 = SW2;");
        let outcome = run(&source);
        assert!(!outcome.ok);
        assert_eq!(outcome.errors, vec![ErrorKind::Device(DeviceError::DevicePresent)]);
        assert_eq!(
            (outcome.diagnostics[0].line, outcome.diagnostics[0].column),
            (3, 15)
        );
        // Later declarations are still built.
        assert_eq!(outcome.circuit.connection_count(), 2);
        assert_eq!(outcome.circuit.monitors().len(), 2);
    }

    #[test]
    fn test_incomplete_network() {
        let outcome = run(&VALID.replace("  SW2 - G1.I2;\n", ""));
        assert_eq!(outcome.errors, syntax(&[SyntaxError::IncompleteNetwork]));
        assert_eq!(
            outcome.output,
            "ERROR (line 8, column 1): Not all inputs are connected\n"
        );
    }

    #[test]
    fn test_unterminated_comment() {
        let source = "DEVICES SWITCH, 0 = SW1; END\n  # never closed";
        let outcome = run(source);
        assert_eq!(
            outcome.errors,
            syntax(&[
                SyntaxError::UnterminatedComment,
                SyntaxError::ExpectConnect,
                SyntaxError::ExpectMonitor,
                SyntaxError::NoMainEnd,
            ])
        );
        assert_eq!(
            (outcome.diagnostics[0].line, outcome.diagnostics[0].column),
            (2, 3)
        );
    }

    #[test]
    fn test_duplicate_section_keyword() {
        let source = "\
DEVICES SWITCH, 0 = SW1; END
CONNECTIONS END
DEVICES SWITCH, 1 = SW2; END
MONITOR SW1; END
MAIN_END";
        let outcome = run(source);
        assert_eq!(
            outcome.errors,
            syntax(&[SyntaxError::ExpectMonitor, SyntaxError::ExtraDevices])
        );
        assert_eq!(
            (outcome.diagnostics[1].line, outcome.diagnostics[1].column),
            (3, 1)
        );
        assert!(outcome.circuit.monitors().is_empty());
    }

    #[test]
    fn test_missing_end_at_eof_clamps_caret() {
        let source = "DEVICES SWITCH,0=SW1;";
        let outcome = run(source);
        assert_eq!(
            outcome.errors,
            syntax(&[
                SyntaxError::NoEnd,
                SyntaxError::ExpectConnect,
                SyntaxError::ExpectMonitor,
                SyntaxError::NoMainEnd,
            ])
        );
        let expected = format!(
            "ERROR (line 1, column 22): Expected an 'END' statement\n{}\n{}^\n",
            source,
            " ".repeat(20)
        );
        assert!(outcome.output.starts_with(&expected), "{}", outcome.output);
    }

    #[test]
    fn test_missing_end_before_next_section() {
        let source = "DEVICES SWITCH, 0 = SW1;\nCONNECTIONS END\nMONITOR SW1; END\nMAIN_END";
        let outcome = run(source);
        assert_eq!(outcome.errors, syntax(&[SyntaxError::NoEnd]));
    }

    #[test]
    fn test_invalid_device_type_resynchronizes() {
        let source = VALID.replace("SWITCH, 0 = SW1;", "= SW1;\n  SWITCH, 0 = SW1;");
        let outcome = run(&source);
        assert_eq!(outcome.errors, syntax(&[SyntaxError::InvalidDeviceType]));
    }

    #[test]
    fn test_no_number_and_no_equals() {
        let source = VALID
            .replace("SWITCH, 0 = SW1;", "SWITCH, X = SW1;")
            .replace("NAND, 2 = G1;", "NAND 2 = G1;;");
        let outcome = run(&source);
        assert_eq!(
            outcome.errors,
            syntax(&[
                SyntaxError::NoNumber,
                SyntaxError::NoEquals,
                SyntaxError::ExtraSemicolon,
            ])
        );
    }

    #[test]
    fn test_connection_syntax_errors() {
        let source = VALID
            .replace("SW1 - G1.I1;", "SW1 G1.I1;\n  SW1 - G1 I1;\n  SW1. - G1.I1;")
            .replace("SW2 - G1.I2;", "SW2 - G1.;\n  SW2 - ;");
        let outcome = run(&source);
        assert_eq!(
            outcome.errors,
            syntax(&[
                SyntaxError::NoDash,
                SyntaxError::NoDot,
                SyntaxError::InvalidOutputLabel,
                SyntaxError::InvalidInputLabel,
                SyntaxError::InvalidDeviceName,
            ])
        );
    }

    #[test]
    fn test_monitor_output_label() {
        let outcome = run(&VALID.replace("  G1;\n", "  G1.;\n"));
        assert_eq!(outcome.errors, syntax(&[SyntaxError::InvalidOutputLabel]));
    }

    #[test]
    fn test_stray_symbol_in_connections() {
        let outcome = run(&VALID.replace("SW2 - G1.I2;", "SW2 - G1.I2; 5 - G1.I2;"));
        assert_eq!(outcome.errors, syntax(&[SyntaxError::InvalidDeviceName]));
    }

    #[test]
    fn test_missing_main_end() {
        let outcome = run(VALID.trim_end().trim_end_matches("MAIN_END"));
        assert_eq!(outcome.errors, syntax(&[SyntaxError::NoMainEnd]));
    }

    #[test]
    fn test_caret_output() {
        let outcome = run(&VALID.replace("NAND, 2 = G1;", "NAND, 2 = ;"));
        assert_eq!(outcome.errors, syntax(&[SyntaxError::InvalidDeviceName]));
        assert_eq!(
            outcome.output,
            "ERROR (line 4, column 13): Not a valid device name\n  NAND, 2 = ;\n            ^\n"
        );
    }

    #[test]
    fn test_inline_locations_disabled() {
        let options = ParseOptions {
            inline_locations: false,
        };
        let outcome = run_with(&VALID.replace("NAND, 2 = G1;", "NAND, 2 = ;"), options);
        assert_eq!(
            outcome.output,
            "ERROR (line 4, column 13): Not a valid device name\n"
        );
    }

    #[test]
    fn test_semantic_anchor_uses_captured_symbol() {
        let source = VALID.replace("NAND, 2 = G1;", "NAND, 20 = G1;");
        let outcome = run(&source);
        assert_eq!(
            outcome.errors,
            vec![ErrorKind::Device(DeviceError::InvalidQualifier)]
        );
        assert_eq!(
            (outcome.diagnostics[0].line, outcome.diagnostics[0].column),
            (4, 9)
        );
    }

    #[test]
    fn test_rejected_device_reported_once() {
        let source = VALID.replace("NAND, 2 = G1;", "NAND, 20 = G1;");
        let outcome = run(&source);
        assert!(!outcome.ok);
        assert_eq!(outcome.diagnostics.len(), 1);
        assert_eq!(
            outcome.output.matches("ERROR").count(),
            1,
            "{}",
            outcome.output
        );
        // Declarations not naming G1 are still built.
        assert_eq!(outcome.circuit.devices().len(), 2);
        assert_eq!(outcome.circuit.monitors().len(), 1);
        assert_eq!(outcome.circuit.connection_count(), 0);
    }

    #[test]
    fn test_redeclared_device_clears_rejection() {
        let source = VALID.replace(
            "NAND, 2 = G1;",
            "NAND, 20 = G1;\n  NAND, 2 = G1;",
        );
        let outcome = run(&source);
        assert_eq!(
            outcome.errors,
            vec![ErrorKind::Device(DeviceError::InvalidQualifier)]
        );
        assert_eq!(outcome.circuit.connection_count(), 2);
        assert_eq!(outcome.circuit.monitors().len(), 2);
    }

    #[test]
    fn test_duplicate_device_does_not_hide_original() {
        let source = VALID.replace("NAND, 2 = G1;", "NAND, 2 = G1;\n  XOR, 3 = G1;");
        let outcome = run(&source);
        assert_eq!(
            outcome.errors,
            vec![ErrorKind::Device(DeviceError::DevicePresent)]
        );
        assert_eq!(outcome.circuit.connection_count(), 2);
    }
}
