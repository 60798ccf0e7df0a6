//! WordML tag registry.
//!
//! Recognized elements are dispatched through compile-time `phf` maps, one
//! per namespace prefix, so looking up a tag is a borrowed-slice hash lookup
//! with no allocation. Anything not in the registry becomes an
//! [`NodeKind::Unidentified`](super::NodeKind::Unidentified) node that keeps
//! its original name.
//!
//! # References
//!
//! - Microsoft Office 2003 XML Reference Schemas: `wordml.xsd`, `auxdoc.xsd`
use std::fmt;

use phf::{Map, phf_map};

/// Structural role of a recognized tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagCategory {
    /// Composite content container (`w:p`, `w:tbl`, ...)
    Container,
    /// Formatting container attached to an owner (`w:pPr`, `w:rPr`, ...)
    Property,
    /// Element living inside a property (`w:jc`, `w:b`, ...)
    PropertyElement,
    /// Childless content node (`w:t`, `w:br`, ...)
    Leaf,
}

/// Recognized WordML tags.
///
/// Using enums instead of strings enables efficient dispatch via match
/// expressions instead of string comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u16)]
pub enum Tag {
    // Document structure
    Document,
    Body,
    Sect,
    SubSection,
    Para,
    Run,
    Hyperlink,
    Placeholder,

    // Tables
    Tbl,
    TblGrid,
    GridCol,
    TRow,
    TCell,

    // Drawings and embedded objects
    Pict,
    Shape,
    ImageData,
    OleObject,

    // Styles, fonts and document settings
    Styles,
    Style,
    StyleName,
    BasedOn,
    NextStyle,
    Fonts,
    Font,
    DocPr,
    DocumentProperties,

    // Properties
    PProp,
    RProp,
    TblProp,
    TblPropEx,
    TRowProp,
    TCellProp,
    SectProp,

    // Paragraph property elements
    Jc,
    Ind,
    PStyle,
    Spacing,
    KeepNext,
    ListPr,
    Ilvl,
    Ilfo,

    // Run property elements
    RStyle,
    RFonts,
    WxFont,
    Color,
    Bold,
    Italic,
    Underline,
    Strike,
    Vanish,
    Highlight,
    Shd,
    Sz,
    SzCs,
    VertAlign,
    Position,

    // Table property elements
    TblStyle,
    TblWidth,
    TblInd,
    TblLayout,
    TblCellMar,
    TblBorders,
    TCellBorders,
    TCellMar,
    TCellWidth,
    TRowHeight,
    TblHeader,
    Top,
    Bottom,
    Left,
    Right,
    InsideH,
    InsideV,
    GridSpan,
    VMerge,
    VAlign,

    // Section property elements
    PgSz,
    PgMar,
    Cols,

    // Leaves
    Text,
    BinData,
    Br,
    Tab,
    NoBreakHyphen,
}

static W_TAGS: Map<&'static str, Tag> = phf_map! {
    "wordDocument" => Tag::Document,
    "body" => Tag::Body,
    "p" => Tag::Para,
    "r" => Tag::Run,
    "hlink" => Tag::Hyperlink,
    "tbl" => Tag::Tbl,
    "tblGrid" => Tag::TblGrid,
    "gridCol" => Tag::GridCol,
    "tr" => Tag::TRow,
    "tc" => Tag::TCell,
    "pict" => Tag::Pict,
    "styles" => Tag::Styles,
    "style" => Tag::Style,
    "name" => Tag::StyleName,
    "basedOn" => Tag::BasedOn,
    "next" => Tag::NextStyle,
    "fonts" => Tag::Fonts,
    "font" => Tag::Font,
    "docPr" => Tag::DocPr,
    "pPr" => Tag::PProp,
    "rPr" => Tag::RProp,
    "tblPr" => Tag::TblProp,
    "tblPrEx" => Tag::TblPropEx,
    "trPr" => Tag::TRowProp,
    "tcPr" => Tag::TCellProp,
    "sectPr" => Tag::SectProp,
    "jc" => Tag::Jc,
    "ind" => Tag::Ind,
    "pStyle" => Tag::PStyle,
    "spacing" => Tag::Spacing,
    "keepNext" => Tag::KeepNext,
    "listPr" => Tag::ListPr,
    "ilvl" => Tag::Ilvl,
    "ilfo" => Tag::Ilfo,
    "rStyle" => Tag::RStyle,
    "rFonts" => Tag::RFonts,
    "color" => Tag::Color,
    "b" => Tag::Bold,
    "i" => Tag::Italic,
    "u" => Tag::Underline,
    "strike" => Tag::Strike,
    "vanish" => Tag::Vanish,
    "highlight" => Tag::Highlight,
    "shd" => Tag::Shd,
    "sz" => Tag::Sz,
    "sz-cs" => Tag::SzCs,
    "vertAlign" => Tag::VertAlign,
    "position" => Tag::Position,
    "tblStyle" => Tag::TblStyle,
    "tblW" => Tag::TblWidth,
    "tblInd" => Tag::TblInd,
    "tblLayout" => Tag::TblLayout,
    "tblCellMar" => Tag::TblCellMar,
    "tblBorders" => Tag::TblBorders,
    "tcBorders" => Tag::TCellBorders,
    "tcMar" => Tag::TCellMar,
    "tcW" => Tag::TCellWidth,
    "trHeight" => Tag::TRowHeight,
    "tblHeader" => Tag::TblHeader,
    "top" => Tag::Top,
    "bottom" => Tag::Bottom,
    "left" => Tag::Left,
    "right" => Tag::Right,
    "insideH" => Tag::InsideH,
    "insideV" => Tag::InsideV,
    "gridSpan" => Tag::GridSpan,
    "vmerge" => Tag::VMerge,
    "vAlign" => Tag::VAlign,
    "pgSz" => Tag::PgSz,
    "pgMar" => Tag::PgMar,
    "cols" => Tag::Cols,
    "t" => Tag::Text,
    "binData" => Tag::BinData,
    "br" => Tag::Br,
    "tab" => Tag::Tab,
    "noBreakHyphen" => Tag::NoBreakHyphen,
};

static WX_TAGS: Map<&'static str, Tag> = phf_map! {
    "sect" => Tag::Sect,
    "sub-section" => Tag::SubSection,
    "font" => Tag::WxFont,
};

static V_TAGS: Map<&'static str, Tag> = phf_map! {
    "shape" => Tag::Shape,
    "imagedata" => Tag::ImageData,
};

static O_TAGS: Map<&'static str, Tag> = phf_map! {
    "OLEObject" => Tag::OleObject,
    "DocumentProperties" => Tag::DocumentProperties,
};

impl Tag {
    /// Look up a tag by namespace prefix and local name.
    ///
    /// Returns `None` for anything outside the registry, including the
    /// placeholder tag which only exists in memory.
    #[inline]
    pub fn from_qname(prefix: &str, local_name: &str) -> Option<Self> {
        let map = match prefix {
            "w" => &W_TAGS,
            "wx" => &WX_TAGS,
            "v" => &V_TAGS,
            "o" => &O_TAGS,
            _ => return None,
        };
        map.get(local_name).copied()
    }

    /// Namespace prefix and local name used in WordML markup.
    pub const fn qname(self) -> (&'static str, &'static str) {
        match self {
            Self::Document => ("w", "wordDocument"),
            Self::Body => ("w", "body"),
            Self::Sect => ("wx", "sect"),
            Self::SubSection => ("wx", "sub-section"),
            Self::Para => ("w", "p"),
            Self::Run => ("w", "r"),
            Self::Hyperlink => ("w", "hlink"),
            Self::Placeholder => ("", "placeholder"),
            Self::Tbl => ("w", "tbl"),
            Self::TblGrid => ("w", "tblGrid"),
            Self::GridCol => ("w", "gridCol"),
            Self::TRow => ("w", "tr"),
            Self::TCell => ("w", "tc"),
            Self::Pict => ("w", "pict"),
            Self::Shape => ("v", "shape"),
            Self::ImageData => ("v", "imagedata"),
            Self::OleObject => ("o", "OLEObject"),
            Self::Styles => ("w", "styles"),
            Self::Style => ("w", "style"),
            Self::StyleName => ("w", "name"),
            Self::BasedOn => ("w", "basedOn"),
            Self::NextStyle => ("w", "next"),
            Self::Fonts => ("w", "fonts"),
            Self::Font => ("w", "font"),
            Self::DocPr => ("w", "docPr"),
            Self::DocumentProperties => ("o", "DocumentProperties"),
            Self::PProp => ("w", "pPr"),
            Self::RProp => ("w", "rPr"),
            Self::TblProp => ("w", "tblPr"),
            Self::TblPropEx => ("w", "tblPrEx"),
            Self::TRowProp => ("w", "trPr"),
            Self::TCellProp => ("w", "tcPr"),
            Self::SectProp => ("w", "sectPr"),
            Self::Jc => ("w", "jc"),
            Self::Ind => ("w", "ind"),
            Self::PStyle => ("w", "pStyle"),
            Self::Spacing => ("w", "spacing"),
            Self::KeepNext => ("w", "keepNext"),
            Self::ListPr => ("w", "listPr"),
            Self::Ilvl => ("w", "ilvl"),
            Self::Ilfo => ("w", "ilfo"),
            Self::RStyle => ("w", "rStyle"),
            Self::RFonts => ("w", "rFonts"),
            Self::WxFont => ("wx", "font"),
            Self::Color => ("w", "color"),
            Self::Bold => ("w", "b"),
            Self::Italic => ("w", "i"),
            Self::Underline => ("w", "u"),
            Self::Strike => ("w", "strike"),
            Self::Vanish => ("w", "vanish"),
            Self::Highlight => ("w", "highlight"),
            Self::Shd => ("w", "shd"),
            Self::Sz => ("w", "sz"),
            Self::SzCs => ("w", "sz-cs"),
            Self::VertAlign => ("w", "vertAlign"),
            Self::Position => ("w", "position"),
            Self::TblStyle => ("w", "tblStyle"),
            Self::TblWidth => ("w", "tblW"),
            Self::TblInd => ("w", "tblInd"),
            Self::TblLayout => ("w", "tblLayout"),
            Self::TblCellMar => ("w", "tblCellMar"),
            Self::TblBorders => ("w", "tblBorders"),
            Self::TCellBorders => ("w", "tcBorders"),
            Self::TCellMar => ("w", "tcMar"),
            Self::TCellWidth => ("w", "tcW"),
            Self::TRowHeight => ("w", "trHeight"),
            Self::TblHeader => ("w", "tblHeader"),
            Self::Top => ("w", "top"),
            Self::Bottom => ("w", "bottom"),
            Self::Left => ("w", "left"),
            Self::Right => ("w", "right"),
            Self::InsideH => ("w", "insideH"),
            Self::InsideV => ("w", "insideV"),
            Self::GridSpan => ("w", "gridSpan"),
            Self::VMerge => ("w", "vmerge"),
            Self::VAlign => ("w", "vAlign"),
            Self::PgSz => ("w", "pgSz"),
            Self::PgMar => ("w", "pgMar"),
            Self::Cols => ("w", "cols"),
            Self::Text => ("w", "t"),
            Self::BinData => ("w", "binData"),
            Self::Br => ("w", "br"),
            Self::Tab => ("w", "tab"),
            Self::NoBreakHyphen => ("w", "noBreakHyphen"),
        }
    }

    #[inline]
    pub const fn prefix(self) -> &'static str {
        self.qname().0
    }

    #[inline]
    pub const fn local_name(self) -> &'static str {
        self.qname().1
    }

    pub const fn category(self) -> TagCategory {
        match self {
            Self::PProp
            | Self::RProp
            | Self::TblProp
            | Self::TblPropEx
            | Self::TRowProp
            | Self::TCellProp
            | Self::SectProp => TagCategory::Property,

            Self::Jc
            | Self::Ind
            | Self::PStyle
            | Self::Spacing
            | Self::KeepNext
            | Self::ListPr
            | Self::Ilvl
            | Self::Ilfo
            | Self::RStyle
            | Self::RFonts
            | Self::WxFont
            | Self::Color
            | Self::Bold
            | Self::Italic
            | Self::Underline
            | Self::Strike
            | Self::Vanish
            | Self::Highlight
            | Self::Shd
            | Self::Sz
            | Self::SzCs
            | Self::VertAlign
            | Self::Position
            | Self::TblStyle
            | Self::TblWidth
            | Self::TblInd
            | Self::TblLayout
            | Self::TblCellMar
            | Self::TblBorders
            | Self::TCellBorders
            | Self::TCellMar
            | Self::TCellWidth
            | Self::TRowHeight
            | Self::TblHeader
            | Self::Top
            | Self::Bottom
            | Self::Left
            | Self::Right
            | Self::InsideH
            | Self::InsideV
            | Self::GridSpan
            | Self::VMerge
            | Self::VAlign
            | Self::PgSz
            | Self::PgMar
            | Self::Cols
            | Self::StyleName
            | Self::BasedOn
            | Self::NextStyle => TagCategory::PropertyElement,

            Self::Text | Self::BinData | Self::Br | Self::Tab | Self::NoBreakHyphen => {
                TagCategory::Leaf
            },

            _ => TagCategory::Container,
        }
    }

    /// Whether nodes of this tag carry a first-line indentation value.
    #[inline]
    pub const fn supports_indentation(self) -> bool {
        matches!(self, Self::Para)
    }

    /// Style-like containers keep `w:jc`/`w:ind` as stored elements instead
    /// of promoting them onto themselves.
    #[inline]
    pub const fn is_style_container(self) -> bool {
        matches!(self, Self::Style | Self::Placeholder)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (prefix, local) = self.qname();
        if prefix.is_empty() {
            f.write_str(local)
        } else {
            write!(f, "{}:{}", prefix, local)
        }
    }
}

/// Namespace prefix and local name of an element outside the registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QName {
    pub prefix: String,
    pub local_name: String,
}

impl QName {
    pub fn new(prefix: impl Into<String>, local_name: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            local_name: local_name.into(),
        }
    }

    /// Case-insensitive match used when closing elements; a blank prefix
    /// only matches a blank prefix.
    pub fn matches_ignore_case(prefix: &str, local_name: &str, other_prefix: &str, other_local: &str) -> bool {
        local_name.eq_ignore_ascii_case(other_local)
            && ((prefix.trim().is_empty() && other_prefix.trim().is_empty())
                || prefix.eq_ignore_ascii_case(other_prefix))
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.prefix.is_empty() {
            f.write_str(&self.local_name)
        } else {
            write!(f, "{}:{}", self.prefix, self.local_name)
        }
    }
}
