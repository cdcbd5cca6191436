//! Canonical sign-in text per chain namespace.
//!
//! The layout is a fixed wire format: the wallet signs the exact bytes, and a
//! verifier must reproduce them from the capability. [`MessageFormatter::render`]
//! and [`MessageFormatter::parse`] are exact inverses for every request that
//! passes render-time validation.
//!
//! ```text
//! <domain> wants you to sign in with your <network> account:
//! <address>
//!
//! <statement>
//!
//! URI: <uri>
//! Version: <version>
//! Chain ID: <chain-id>
//! Nonce: <nonce>
//! Issued At: <issued-at>
//! Expiration Time: <expiration-time>
//! Not Before: <not-before>
//! Request ID: <request-id>
//! Resources:
//! - <resource>
//! ```
//!
//! The statement (with its trailing blank line) and every line after
//! `Issued At` are present only when the request carries them.

use cacao_core::{
    HEADER_CAIP122, HEADER_EIP4361, SCHEME_EIP191, SCHEME_SOLANA_ED25519, now_timestamp,
    parse_timestamp,
};
use tracing::debug;

use crate::error::{SiwxError, SiwxResult};
use crate::message::SiwxMessage;
use crate::nonce::{generate_nonce, is_valid_nonce};

const URI_TAG: &str = "URI: ";
const VERSION_TAG: &str = "Version: ";
const CHAIN_ID_TAG: &str = "Chain ID: ";
const NONCE_TAG: &str = "Nonce: ";
const ISSUED_AT_TAG: &str = "Issued At: ";
const EXPIRATION_TIME_TAG: &str = "Expiration Time: ";
const NOT_BEFORE_TAG: &str = "Not Before: ";
const REQUEST_ID_TAG: &str = "Request ID: ";
const RESOURCES_TAG: &str = "Resources:";
const RESOURCE_ITEM_TAG: &str = "- ";

/// Whether a namespace carries its chain reference in the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainIdLine {
    /// Emit a `Chain ID:` line.
    Emit,
    /// Omit the line; the chain reference is always `reference`.
    Omit {
        /// The constant chain reference of the namespace.
        reference: String,
    },
}

/// Output of [`MessageFormatter::render`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    /// The exact text the wallet signs.
    pub text: String,
    /// The request with `nonce` and `issued_at` filled in.
    pub message: SiwxMessage,
}

impl Rendered {
    /// The bytes to sign.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }
}

/// Message format of one chain namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageFormatter {
    namespace: String,
    network_name: String,
    header_type: String,
    signature_scheme: String,
    chain_id_line: ChainIdLine,
}

impl MessageFormatter {
    /// Create a formatter that emits the chain id line.
    #[must_use]
    pub fn new(
        namespace: impl Into<String>,
        network_name: impl Into<String>,
        header_type: impl Into<String>,
        signature_scheme: impl Into<String>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            network_name: network_name.into(),
            header_type: header_type.into(),
            signature_scheme: signature_scheme.into(),
            chain_id_line: ChainIdLine::Emit,
        }
    }

    /// Set how the chain id is carried.
    #[must_use]
    pub fn with_chain_id_line(mut self, chain_id_line: ChainIdLine) -> Self {
        self.chain_id_line = chain_id_line;
        self
    }

    /// Sign-In with Ethereum (`eip155`, EIP-191 signatures).
    #[must_use]
    pub fn ethereum() -> Self {
        Self::new("eip155", "Ethereum", HEADER_EIP4361, SCHEME_EIP191)
    }

    /// Sign-In with Solana (`solana`, Ed25519 signatures).
    #[must_use]
    pub fn solana() -> Self {
        Self::new("solana", "Solana", HEADER_CAIP122, SCHEME_SOLANA_ED25519)
    }

    /// Namespace tag, e.g. `eip155`.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Network name shown in the first line, e.g. `Ethereum`.
    #[must_use]
    pub fn network_name(&self) -> &str {
        &self.network_name
    }

    /// Header type of capabilities built from this namespace.
    #[must_use]
    pub fn header_type(&self) -> &str {
        &self.header_type
    }

    /// Default signature scheme tag of the namespace.
    #[must_use]
    pub fn signature_scheme(&self) -> &str {
        &self.signature_scheme
    }

    /// How the chain id is carried.
    #[must_use]
    pub fn chain_id_line(&self) -> &ChainIdLine {
        &self.chain_id_line
    }

    fn header_suffix(&self) -> String {
        format!(" wants you to sign in with your {} account:", self.network_name)
    }

    /// Render the canonical text of a request.
    ///
    /// A missing nonce is generated and a missing `issued_at` defaults to
    /// now; the filled request is returned alongside the text so the same
    /// values can be packaged and re-rendered.
    ///
    /// # Errors
    ///
    /// Returns [`SiwxError::InvalidField`] if a field would break the
    /// layout (embedded newline, empty required value, short or
    /// non-alphanumeric nonce, unparsable timestamp, or a chain id that
    /// differs from an omitted constant reference).
    pub fn render(&self, request: &SiwxMessage) -> SiwxResult<Rendered> {
        let mut message = request.clone();
        if message.nonce.is_none() {
            message.nonce = Some(generate_nonce());
        }
        if message.issued_at.is_none() {
            message.issued_at = Some(now_timestamp());
        }
        self.validate(&message)?;

        let text = self.layout(&message);
        debug!(
            namespace = %self.namespace,
            domain = %message.domain,
            "Rendered sign-in message"
        );
        Ok(Rendered { text, message })
    }

    fn validate(&self, message: &SiwxMessage) -> SiwxResult<()> {
        required("domain", &message.domain)?;
        required("address", &message.address)?;
        required("uri", &message.uri)?;
        required("version", &message.version)?;

        match &self.chain_id_line {
            ChainIdLine::Emit => required("chain_id", &message.chain_id)?,
            ChainIdLine::Omit { reference } => {
                if &message.chain_id != reference {
                    return Err(SiwxError::InvalidField {
                        field: "chain_id",
                        reason: format!(
                            "namespace {} only supports chain id '{reference}'",
                            self.namespace
                        ),
                    });
                }
            },
        }

        if let Some(statement) = &message.statement {
            single_line("statement", statement)?;
        }

        let nonce = message.nonce.as_deref().unwrap_or_default();
        single_line("nonce", nonce)?;
        if !is_valid_nonce(nonce) {
            return Err(SiwxError::InvalidField {
                field: "nonce",
                reason: "must be at least 8 alphanumeric characters".to_string(),
            });
        }

        timestamp("issued_at", message.issued_at.as_deref().unwrap_or_default())?;
        if let Some(value) = &message.expiration_time {
            timestamp("expiration_time", value)?;
        }
        if let Some(value) = &message.not_before {
            timestamp("not_before", value)?;
        }
        if let Some(value) = &message.request_id {
            single_line("request_id", value)?;
        }
        for resource in message.resources.iter().flatten() {
            single_line("resources", resource)?;
        }
        Ok(())
    }

    fn layout(&self, message: &SiwxMessage) -> String {
        let mut lines = vec![
            format!("{}{}", message.domain, self.header_suffix()),
            message.address.clone(),
            String::new(),
        ];

        if let Some(statement) = &message.statement {
            lines.push(statement.clone());
            lines.push(String::new());
        }

        lines.push(format!("{URI_TAG}{}", message.uri));
        lines.push(format!("{VERSION_TAG}{}", message.version));
        if self.chain_id_line == ChainIdLine::Emit {
            lines.push(format!("{CHAIN_ID_TAG}{}", message.chain_id));
        }
        if let Some(nonce) = &message.nonce {
            lines.push(format!("{NONCE_TAG}{nonce}"));
        }
        if let Some(issued_at) = &message.issued_at {
            lines.push(format!("{ISSUED_AT_TAG}{issued_at}"));
        }
        if let Some(value) = &message.expiration_time {
            lines.push(format!("{EXPIRATION_TIME_TAG}{value}"));
        }
        if let Some(value) = &message.not_before {
            lines.push(format!("{NOT_BEFORE_TAG}{value}"));
        }
        if let Some(value) = &message.request_id {
            lines.push(format!("{REQUEST_ID_TAG}{value}"));
        }
        if let Some(resources) = &message.resources {
            lines.push(RESOURCES_TAG.to_string());
            for resource in resources {
                lines.push(format!("{RESOURCE_ITEM_TAG}{resource}"));
            }
        }

        lines.join("\n")
    }

    /// Parse canonical text back into a request.
    ///
    /// Only the exact layout produced by [`render`](Self::render) for this
    /// formatter's network name is accepted. The result never carries a
    /// signature.
    ///
    /// # Errors
    ///
    /// Returns [`SiwxError::MalformedMessage`] naming the first line that
    /// breaks the layout.
    pub fn parse(&self, text: &str) -> SiwxResult<SiwxMessage> {
        let mut cursor = Cursor::new(text);

        let header = cursor.current().unwrap_or_default();
        let domain = header
            .strip_suffix(self.header_suffix().as_str())
            .filter(|d| !d.is_empty())
            .ok_or_else(|| {
                cursor.malformed(format!(
                    "expected '<domain>{}'",
                    self.header_suffix()
                ))
            })?;
        cursor.advance();

        let address = cursor
            .current()
            .filter(|a| !a.is_empty())
            .ok_or_else(|| cursor.malformed("expected account address"))?;
        cursor.advance();

        cursor.expect_blank("expected blank line after address")?;

        let statement = if cursor.next_is_blank() {
            let statement = cursor.current().unwrap_or_default();
            cursor.advance();
            cursor.advance();
            Some(statement.to_string())
        } else {
            None
        };

        let uri = cursor.required_field(URI_TAG)?;
        let version = cursor.required_field(VERSION_TAG)?;
        let chain_id = match &self.chain_id_line {
            ChainIdLine::Emit => cursor.required_field(CHAIN_ID_TAG)?.to_string(),
            ChainIdLine::Omit { reference } => reference.clone(),
        };

        let nonce_line = cursor.line_no();
        let nonce = cursor.required_field(NONCE_TAG)?;
        if !is_valid_nonce(nonce) {
            return Err(malformed_at(
                nonce_line,
                "nonce must be at least 8 alphanumeric characters",
            ));
        }

        let issued_at = cursor.timestamp_field(ISSUED_AT_TAG, true)?;
        let expiration_time = cursor.timestamp_field(EXPIRATION_TIME_TAG, false)?;
        let not_before = cursor.timestamp_field(NOT_BEFORE_TAG, false)?;
        let request_id = cursor.optional_field(REQUEST_ID_TAG);

        let resources = if cursor.current() == Some(RESOURCES_TAG) {
            cursor.advance();
            let mut resources = Vec::new();
            while let Some(item) = cursor.current().and_then(|l| l.strip_prefix(RESOURCE_ITEM_TAG))
            {
                resources.push(item.to_string());
                cursor.advance();
            }
            Some(resources)
        } else {
            None
        };

        if let Some(line) = cursor.current() {
            return Err(cursor.malformed(format!("unexpected line '{line}'")));
        }

        Ok(SiwxMessage {
            domain: domain.to_string(),
            address: address.to_string(),
            statement,
            uri: uri.to_string(),
            version: version.to_string(),
            chain_id,
            nonce: Some(nonce.to_string()),
            issued_at: issued_at.map(str::to_string),
            expiration_time: expiration_time.map(str::to_string),
            not_before: not_before.map(str::to_string),
            request_id: request_id.map(str::to_string),
            resources,
            signature: None,
            signature_type: None,
        })
    }
}

fn required(field: &'static str, value: &str) -> SiwxResult<()> {
    if value.is_empty() {
        return Err(SiwxError::InvalidField {
            field,
            reason: "must not be empty".to_string(),
        });
    }
    single_line(field, value)
}

fn single_line(field: &'static str, value: &str) -> SiwxResult<()> {
    if value.contains('\n') {
        return Err(SiwxError::InvalidField {
            field,
            reason: "must not contain a newline".to_string(),
        });
    }
    Ok(())
}

fn timestamp(field: &'static str, value: &str) -> SiwxResult<()> {
    single_line(field, value)?;
    parse_timestamp(value).map_err(|e| SiwxError::InvalidField {
        field,
        reason: e.to_string(),
    })?;
    Ok(())
}

fn malformed_at(line: usize, reason: impl Into<String>) -> SiwxError {
    SiwxError::MalformedMessage {
        line,
        reason: reason.into(),
    }
}

/// Line-by-line reader over message text.
struct Cursor<'a> {
    lines: Vec<&'a str>,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            lines: text.split('\n').collect(),
            pos: 0,
        }
    }

    fn current(&self) -> Option<&'a str> {
        self.lines.get(self.pos).copied()
    }

    fn next_is_blank(&self) -> bool {
        self.lines.get(self.pos.saturating_add(1)).copied() == Some("")
    }

    fn advance(&mut self) {
        self.pos = self.pos.saturating_add(1);
    }

    /// 1-based number of the current line.
    fn line_no(&self) -> usize {
        self.pos.saturating_add(1)
    }

    fn malformed(&self, reason: impl Into<String>) -> SiwxError {
        malformed_at(self.line_no(), reason)
    }

    fn expect_blank(&mut self, reason: &str) -> SiwxResult<()> {
        if self.current() != Some("") {
            return Err(self.malformed(reason));
        }
        self.advance();
        Ok(())
    }

    fn required_field(&mut self, tag: &str) -> SiwxResult<&'a str> {
        let name = tag.trim_end_matches([':', ' ']);
        let Some(line) = self.current() else {
            return Err(self.malformed(format!("missing '{name}'")));
        };
        let value = line
            .strip_prefix(tag)
            .ok_or_else(|| self.malformed(format!("expected '{name}', found '{line}'")))?;
        if value.is_empty() {
            return Err(self.malformed(format!("empty '{name}'")));
        }
        self.advance();
        Ok(value)
    }

    fn optional_field(&mut self, tag: &str) -> Option<&'a str> {
        let value = self.current()?.strip_prefix(tag)?;
        self.advance();
        Some(value)
    }

    fn timestamp_field(&mut self, tag: &str, required: bool) -> SiwxResult<Option<&'a str>> {
        let line = self.line_no();
        let value = if required {
            Some(self.required_field(tag)?)
        } else {
            self.optional_field(tag)
        };
        if let Some(value) = value {
            parse_timestamp(value).map_err(|e| malformed_at(line, e.to_string()))?;
        }
        Ok(value)
    }
}
