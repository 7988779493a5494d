//! A configured entry point bundling an oracle, a locale and defaults.

use textbound_config::TextboundConfig;

use crate::boundary::{
    ALL, BoundaryKind, BreakOracle, Mapping, OracleOptions, RuleMask, UnicodeOracle, parse_mask,
};
use crate::error::Result;
use crate::locale::Locale;
use crate::text::TextSource;

/// Maps texts with one oracle under one locale.
#[derive(Debug)]
pub struct Segmenter {
    oracle: Box<dyn BreakOracle + Send + Sync>,
    locale: Locale,
    kind: BoundaryKind,
    mask: RuleMask,
    full_select: bool,
}

impl Segmenter {
    /// A word segmenter with the default Unicode oracle and no filtering.
    pub fn new(locale: Locale) -> Self {
        Self::with_oracle(locale, UnicodeOracle::default())
    }

    pub fn with_oracle<O>(locale: Locale, oracle: O) -> Self
    where
        O: BreakOracle + Send + Sync + 'static,
    {
        Self {
            oracle: Box::new(oracle),
            locale,
            kind: BoundaryKind::Word,
            mask: ALL,
            full_select: false,
        }
    }

    /// Build a segmenter from loaded configuration.
    ///
    /// Without a configured locale name the process locale is used.
    ///
    /// # Errors
    /// Fails on an unparsable locale, boundary kind or mask expression.
    pub fn from_config(config: &TextboundConfig) -> Result<Self> {
        let locale = match config.locale.name.as_deref() {
            Some(name) => Locale::parse(name)?,
            None => Locale::from_env()?,
        };
        let segmentation = &config.segmentation;
        let kind = segmentation.boundary.parse::<BoundaryKind>()?;
        let mask = segmentation
            .mask
            .as_deref()
            .map(parse_mask)
            .transpose()?
            .unwrap_or(ALL);
        let oracle = UnicodeOracle::new(OracleOptions {
            merge_cjk_runs: segmentation.merge_cjk_runs,
        });

        tracing::debug!(%locale, %kind, mask = format_args!("{mask:#x}"), "segmenter configured");
        Ok(Self::with_oracle(locale, oracle)
            .with_kind(kind)
            .with_mask(mask)
            .with_full_select(segmentation.full_select))
    }

    pub fn with_kind(mut self, kind: BoundaryKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_mask(mut self, mask: RuleMask) -> Self {
        self.mask = mask;
        self
    }

    /// Default for token iteration by callers; the segmenter stores it but
    /// mappings do not.
    pub fn with_full_select(mut self, full_select: bool) -> Self {
        self.full_select = full_select;
        self
    }

    /// Map `text` for `kind` with the default mask.
    ///
    /// # Errors
    /// Propagates oracle and encoding failures.
    pub fn map<S: TextSource>(&self, kind: BoundaryKind, text: S) -> Result<Mapping<S>> {
        Mapping::with_oracle(self.oracle.as_ref(), kind, text, self.mask, &self.locale)
    }

    /// Map `text` for the default kind.
    ///
    /// # Errors
    /// Propagates oracle and encoding failures.
    pub fn map_default<S: TextSource>(&self, text: S) -> Result<Mapping<S>> {
        self.map(self.kind, text)
    }

    /// Rebuild `mapping` in place, keeping its mask.
    ///
    /// # Errors
    /// On failure `mapping` is left unchanged.
    pub fn remap<S: TextSource>(
        &self,
        mapping: &mut Mapping<S>,
        kind: BoundaryKind,
        text: S,
    ) -> Result<()> {
        mapping.map_with_oracle(self.oracle.as_ref(), kind, text, None, &self.locale)
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    pub fn kind(&self) -> BoundaryKind {
        self.kind
    }

    pub fn mask(&self) -> RuleMask {
        self.mask
    }

    pub fn full_select(&self) -> bool {
        self.full_select
    }

    pub fn oracle(&self) -> &dyn BreakOracle {
        self.oracle.as_ref()
    }
}

impl Default for Segmenter {
    fn default() -> Self {
        Self::new(Locale::classic())
    }
}
