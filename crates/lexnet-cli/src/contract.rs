//! Per-task argument contracts
//!
//! Each task declares which arguments it needs, which it accepts and where
//! its corpus may come from. A contract is checked once, before any input is
//! read, and reports every violation together.

use std::path::{Path, PathBuf};

use lexnet_core::{Checker, LexnetError, Result, Rule, Violation};

use crate::Cli;

/// Numeric arguments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Param {
    MaxK,
    WindowSize,
    Threshold,
    MaximalDistance,
    FixedLength,
}

impl Param {
    pub const ALL: [Param; 5] = [
        Param::MaxK,
        Param::WindowSize,
        Param::Threshold,
        Param::MaximalDistance,
        Param::FixedLength,
    ];

    pub fn flag(self) -> &'static str {
        match self {
            Param::MaxK => "maxk",
            Param::WindowSize => "windowsize",
            Param::Threshold => "threshold",
            Param::MaximalDistance => "maximal_distance",
            Param::FixedLength => "fixed_length",
        }
    }

    fn value(self, cli: &Cli) -> Option<i64> {
        match self {
            Param::MaxK => cli.maxk,
            Param::WindowSize => cli.windowsize,
            Param::Threshold => cli.threshold,
            Param::MaximalDistance => cli.maximal_distance,
            Param::FixedLength => cli.fixed_length,
        }
    }
}

/// File arguments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileArg {
    Sentences,
    Names,
    RemoveWords,
    Preprocessed,
    QueryPath,
    Pairs,
    Edges,
}

impl FileArg {
    pub const ALL: [FileArg; 7] = [
        FileArg::Sentences,
        FileArg::Names,
        FileArg::RemoveWords,
        FileArg::Preprocessed,
        FileArg::QueryPath,
        FileArg::Pairs,
        FileArg::Edges,
    ];

    /// Raw inputs replaced by `--preprocessed` or `--edges`
    const RAW: [FileArg; 3] = [FileArg::Sentences, FileArg::Names, FileArg::RemoveWords];

    pub fn flag(self) -> &'static str {
        match self {
            FileArg::Sentences => "sentences",
            FileArg::Names => "names",
            FileArg::RemoveWords => "remove_words",
            FileArg::Preprocessed => "preprocessed",
            FileArg::QueryPath => "qsek_query_path",
            FileArg::Pairs => "pairs",
            FileArg::Edges => "edges",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            FileArg::Sentences | FileArg::Names | FileArg::RemoveWords => "csv",
            _ => "json",
        }
    }

    fn path(self, cli: &Cli) -> Option<&PathBuf> {
        match self {
            FileArg::Sentences => cli.sentences.as_ref(),
            FileArg::Names => cli.names.as_ref(),
            FileArg::RemoveWords => cli.remove_words.as_ref(),
            FileArg::Preprocessed => cli.preprocessed.as_ref(),
            FileArg::QueryPath => cli.qsek_query_path.as_ref(),
            FileArg::Pairs => cli.pairs.as_ref(),
            FileArg::Edges => cli.edges.as_ref(),
        }
    }
}

/// Where a task's corpus may come from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// Raw CSV files only
    Raw,
    /// Raw CSV files or `--preprocessed`
    Corpus,
    /// As [`Source::Corpus`], or a prebuilt `--edges` list
    CorpusOrEdges,
}

/// Argument requirements of one task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskContract {
    pub task: u8,
    pub source: Source,
    /// Whether the task reads the names registry
    pub entities: bool,
    /// Always required
    pub params: &'static [Param],
    /// Required when the co-occurrence graph is built from the corpus
    pub graph_params: &'static [Param],
    /// Task specific input files, always required
    pub files: &'static [FileArg],
}

const CONTRACTS: [TaskContract; 9] = [
    TaskContract {
        task: 1,
        source: Source::Raw,
        entities: true,
        params: &[],
        graph_params: &[],
        files: &[FileArg::RemoveWords],
    },
    TaskContract {
        task: 2,
        source: Source::Corpus,
        entities: false,
        params: &[Param::MaxK],
        graph_params: &[],
        files: &[],
    },
    TaskContract {
        task: 3,
        source: Source::Corpus,
        entities: true,
        params: &[],
        graph_params: &[],
        files: &[],
    },
    TaskContract {
        task: 4,
        source: Source::Corpus,
        entities: false,
        params: &[Param::MaxK],
        graph_params: &[],
        files: &[FileArg::QueryPath],
    },
    TaskContract {
        task: 5,
        source: Source::Corpus,
        entities: true,
        params: &[Param::MaxK],
        graph_params: &[],
        files: &[],
    },
    TaskContract {
        task: 6,
        source: Source::Corpus,
        entities: true,
        params: &[],
        graph_params: &[Param::WindowSize, Param::Threshold],
        files: &[],
    },
    TaskContract {
        task: 7,
        source: Source::CorpusOrEdges,
        entities: true,
        params: &[Param::MaximalDistance],
        graph_params: &[Param::WindowSize, Param::Threshold],
        files: &[FileArg::Pairs],
    },
    TaskContract {
        task: 8,
        source: Source::CorpusOrEdges,
        entities: true,
        params: &[Param::FixedLength],
        graph_params: &[Param::WindowSize, Param::Threshold],
        files: &[FileArg::Pairs],
    },
    TaskContract {
        task: 9,
        source: Source::Corpus,
        entities: false,
        params: &[Param::Threshold],
        graph_params: &[],
        files: &[],
    },
];

/// Numeric arguments after validation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Params {
    pub maxk: Option<usize>,
    pub window_size: Option<usize>,
    pub threshold: Option<usize>,
    pub maximal_distance: Option<usize>,
    pub fixed_length: Option<usize>,
}

impl Params {
    fn set(&mut self, param: Param, value: usize) {
        let slot = match param {
            Param::MaxK => &mut self.maxk,
            Param::WindowSize => &mut self.window_size,
            Param::Threshold => &mut self.threshold,
            Param::MaximalDistance => &mut self.maximal_distance,
            Param::FixedLength => &mut self.fixed_length,
        };
        *slot = Some(value);
    }

    /// Value of a parameter the contract required
    pub fn get(&self, param: Param) -> Result<usize> {
        let value = match param {
            Param::MaxK => self.maxk,
            Param::WindowSize => self.window_size,
            Param::Threshold => self.threshold,
            Param::MaximalDistance => self.maximal_distance,
            Param::FixedLength => self.fixed_length,
        };
        value.ok_or_else(|| {
            LexnetError::InvalidParameter(
                vec![Violation {
                    field: param.flag().to_string(),
                    rule: Rule::Required,
                }]
                .into(),
            )
        })
    }
}

fn check_file(checker: &mut Checker, arg: FileArg, path: &Path) {
    if !path.is_file() {
        checker.push(arg.flag(), Rule::FileNotFound);
    } else if path.extension().and_then(|e| e.to_str()) != Some(arg.extension()) {
        checker.push(
            arg.flag(),
            Rule::WrongExtension {
                expected: arg.extension(),
            },
        );
    }
}

impl TaskContract {
    /// Contract of a task number; `None` outside 1-9
    pub fn for_task(task: u8) -> Option<&'static TaskContract> {
        CONTRACTS.iter().find(|c| c.task == task)
    }

    /// Whether this invocation reads a prebuilt edge list
    pub fn uses_edges(&self, cli: &Cli) -> bool {
        self.source == Source::CorpusOrEdges && cli.edges.is_some()
    }

    /// Check every argument against the contract.
    ///
    /// Returns the validated numeric parameters, or every violation at once.
    pub fn check(&self, cli: &Cli) -> Result<Params> {
        let mut checker = Checker::new();
        let uses_edges = self.uses_edges(cli);
        let mut accepted: Vec<Param> = self.params.to_vec();

        // corpus source
        if uses_edges {
            for arg in FileArg::RAW.into_iter().chain([FileArg::Preprocessed]) {
                if arg.path(cli).is_some() {
                    checker.push(
                        arg.flag(),
                        Rule::Conflicts {
                            other: FileArg::Edges.flag().to_string(),
                        },
                    );
                }
            }
        } else {
            accepted.extend_from_slice(self.graph_params);
            for &param in self.graph_params {
                checker.require(param.flag(), param.value(cli).as_ref());
            }

            if self.source != Source::Raw && cli.preprocessed.is_some() {
                for arg in FileArg::RAW {
                    if arg.path(cli).is_some() {
                        checker.push(
                            arg.flag(),
                            Rule::Conflicts {
                                other: FileArg::Preprocessed.flag().to_string(),
                            },
                        );
                    }
                }
            } else {
                checker.require(FileArg::Sentences.flag(), cli.sentences.as_ref());
                if self.entities {
                    checker.require(FileArg::Names.flag(), cli.names.as_ref());
                }
                if self.source == Source::Raw {
                    checker.forbid(FileArg::Preprocessed.flag(), cli.preprocessed.as_ref());
                }
            }
        }
        if self.source != Source::CorpusOrEdges {
            checker.forbid(FileArg::Edges.flag(), cli.edges.as_ref());
        }
        if !self.entities {
            checker.forbid(FileArg::Names.flag(), cli.names.as_ref());
        }

        // task specific files
        if self.files.contains(&FileArg::RemoveWords) {
            checker.require(FileArg::RemoveWords.flag(), cli.remove_words.as_ref());
        }
        for arg in [FileArg::QueryPath, FileArg::Pairs] {
            if self.files.contains(&arg) {
                checker.require(arg.flag(), arg.path(cli));
            } else {
                checker.forbid(arg.flag(), arg.path(cli));
            }
        }

        // numeric parameters
        let mut params = Params::default();
        for param in Param::ALL {
            let value = param.value(cli);
            if !accepted.contains(&param) {
                checker.forbid(param.flag(), value.as_ref());
                continue;
            }
            if self.params.contains(&param) {
                checker.require(param.flag(), value.as_ref());
            }
            if let Some(value) = value.and_then(|v| checker.non_negative(param.flag(), v)) {
                params.set(param, value);
            }
        }
        if !uses_edges {
            for &param in self.graph_params {
                if let Ok(value) = params.get(param) {
                    checker.at_least(param.flag(), value, 1);
                }
            }
        }

        // every supplied file must exist with the expected extension
        for arg in FileArg::ALL {
            if let Some(path) = arg.path(cli) {
                check_file(&mut checker, arg, path);
            }
        }

        checker.finish()?;
        Ok(params)
    }
}
