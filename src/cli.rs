use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::render::RenderOptions;
use crate::sort::{MemberSort, UnitSort};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum UnitSortArg {
    /// Keep the binary's declaration order
    Declaration,
    /// Protocols first, then alphabetical by name
    Alphabetic,
}

impl From<UnitSortArg> for UnitSort {
    fn from(arg: UnitSortArg) -> Self {
        match arg {
            UnitSortArg::Declaration => UnitSort::Declaration,
            UnitSortArg::Alphabetic => UnitSort::Alphabetic,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum MemberSortArg {
    /// Keep the binary's declaration order
    Declaration,
    /// Alphabetical by raw selector
    Alphabetic,
    /// Class methods first, then init selectors, then alphabetical
    AlphabeticAlt,
}

impl From<MemberSortArg> for MemberSort {
    fn from(arg: MemberSortArg) -> Self {
        match arg {
            MemberSortArg::Declaration => MemberSort::Declaration,
            MemberSortArg::Alphabetic => MemberSort::Alphabetic,
            MemberSortArg::AlphabeticAlt => MemberSort::AlphabeticAlt,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "declassify")]
#[command(
    about = "Reconstructs Objective-C interface declarations from decoded runtime metadata",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    /// Decoded-metadata JSON document produced by the extractor
    pub metadata: PathBuf,

    /// Write one header file per class into this directory
    #[arg(short = 'H', long = "headers", value_name = "DIR")]
    pub headers: Option<PathBuf>,

    /// Print the shared struct declarations instead of class interfaces
    #[arg(long, conflicts_with = "headers")]
    pub structs: bool,

    /// Append method and accessor addresses as trailing comments
    #[arg(short = 'a', long)]
    pub addresses: bool,

    /// Comment verbosity: 0 hides auxiliary members, 2 shows every annotation
    #[arg(
        short = 'A',
        long = "comments",
        value_name = "LEVEL",
        default_value_t = 0,
        value_parser = clap::value_parser!(u8).range(0..=2)
    )]
    pub comments: u8,

    /// Append ivar byte offsets as trailing comments
    #[arg(long)]
    pub ivar_offsets: bool,

    /// Class and protocol ordering
    #[arg(short = 's', long = "sort", value_enum, default_value = "declaration")]
    pub sort_classes: UnitSortArg,

    /// Member ordering inside each class
    #[arg(short = 'S', long = "sort-members", value_enum, default_value = "declaration")]
    pub sort_members: MemberSortArg,

    /// Suppress classes, protocols and categories matching this pattern
    #[arg(long, value_name = "REGEX")]
    pub filter_class: Option<String>,

    /// Suppress methods and properties matching this pattern
    #[arg(long, value_name = "REGEX")]
    pub filter_method: Option<String>,

    /// Suppress names with this prefix, ignoring leading underscores (repeatable)
    #[arg(long = "kill-prefix", value_name = "PREFIX")]
    pub kill_prefixes: Vec<String>,

    /// Tab-separated hint table carrying corrected method signatures
    #[arg(long, value_name = "FILE")]
    pub hints: Option<PathBuf>,

    /// Skip classes the binary marks hidden
    #[arg(long)]
    pub exported_only: bool,

    /// Skip categories
    #[arg(long)]
    pub hide_categories: bool,

    /// Skip protocols
    #[arg(long)]
    pub hide_protocols: bool,

    /// Put a space between the method sigil and the return type
    #[arg(long)]
    pub sigil_space: bool,
}

impl Cli {
    pub fn unit_sort(&self) -> UnitSort {
        self.sort_classes.into()
    }

    pub fn member_sort(&self) -> MemberSort {
        self.sort_members.into()
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            addresses: self.addresses,
            verbosity: self.comments,
            ivar_offsets: self.ivar_offsets,
            member_sort: self.member_sort(),
            exported_only: self.exported_only,
            sigil_space: self.sigil_space,
            hide_categories: self.hide_categories,
            hide_protocols: self.hide_protocols,
        }
    }
}
