//! Task bodies
//!
//! Every task loads its inputs, runs one core operation and wraps the
//! result under its report key.

use serde::Serialize;
use tracing::info;

use lexnet_core::{Corpus, EntityRegistry, LexnetError, Result};
use lexnet_graph::{answer_pairs, build_edges, cluster_sentences, EntityGraph, PairQuery};
use lexnet_index::{
    context_sequences, mention_counts, mentions_by_entity, sequence_counts, SequenceIndex,
};
use lexnet_text::{
    load_edges, load_entities, load_pairs, load_preprocessed, load_query_keys,
    load_removal_words, load_sentences, ProcessedCorpus, RemovalList,
};

use crate::contract::{Param, Params, TaskContract};
use crate::{Body, Cli};

/// Normalized corpus and registry a task works on
struct Inputs {
    corpus: Corpus,
    registry: EntityRegistry,
}

fn required<'a, T>(value: Option<&'a T>, flag: &str) -> Result<&'a T> {
    value.ok_or_else(|| LexnetError::MalformedInput(format!("missing --{flag}")))
}

fn load_inputs(cli: &Cli, contract: &TaskContract) -> Result<Inputs> {
    if let Some(path) = &cli.preprocessed {
        let processed = load_preprocessed(path)?;
        info!(
            sentences = processed.sentences.len(),
            names = processed.names.len(),
            "Loaded preprocessed input"
        );
        return Ok(Inputs {
            corpus: processed.sentences,
            registry: processed.names,
        });
    }

    let removal = match &cli.remove_words {
        Some(path) => load_removal_words(path)?,
        None => RemovalList::empty(),
    };
    let corpus = load_sentences(required(cli.sentences.as_ref(), "sentences")?, &removal)?;
    let registry = if contract.entities {
        load_entities(required(cli.names.as_ref(), "names")?, &removal)?
    } else {
        EntityRegistry::default()
    };

    info!(
        sentences = corpus.len(),
        names = registry.len(),
        removal_words = removal.words().len(),
        "Loaded raw input"
    );
    Ok(Inputs { corpus, registry })
}

fn keyed<T: Serialize>(key: impl Into<String>, value: T) -> Result<Body> {
    let value = serde_json::to_value(value).map_err(|e| LexnetError::Other(e.into()))?;
    Ok(Body::Keyed {
        key: key.into(),
        value,
    })
}

/// Run the task the contract describes with already validated parameters
pub fn execute(cli: &Cli, contract: &TaskContract, params: &Params) -> Result<Body> {
    if contract.uses_edges(cli) {
        let edges = load_edges(required(cli.edges.as_ref(), "edges")?)?;
        info!(edges = edges.len(), "Loaded edge list");
        let graph = EntityGraph::from_edges(&edges);
        return pair_task(cli, contract, params, &graph);
    }

    let Inputs { corpus, registry } = load_inputs(cli, contract)?;

    match contract.task {
        1 => Ok(Body::Processed(ProcessedCorpus {
            sentences: corpus,
            names: registry,
        })),
        2 => {
            let maxk = params.get(Param::MaxK)?;
            keyed(format!("{maxk}-Seq Counts"), sequence_counts(&corpus, maxk))
        }
        3 => keyed("Name Mentions", mention_counts(&corpus, &registry)),
        4 => {
            let keys = load_query_keys(required(cli.qsek_query_path.as_ref(), "qsek_query_path")?)?;
            let index = SequenceIndex::build(&corpus, Some(params.get(Param::MaxK)?));
            keyed("K-Seq Matches", index.count_known_sequences(&keys))
        }
        5 => {
            let mentions = mentions_by_entity(&corpus, &registry);
            keyed(
                "Person Contexts and K-Seqs",
                context_sequences(&mentions, params.get(Param::MaxK)?),
            )
        }
        6 => {
            let edges = build_edges(
                &corpus,
                &registry,
                params.get(Param::WindowSize)?,
                params.get(Param::Threshold)?,
            )?;
            keyed("Pair Matches", edges)
        }
        7 | 8 => {
            let graph = EntityGraph::from_corpus(
                &corpus,
                &registry,
                params.get(Param::WindowSize)?,
                params.get(Param::Threshold)?,
            )?;
            pair_task(cli, contract, params, &graph)
        }
        9 => keyed(
            "group Matches",
            cluster_sentences(&corpus, params.get(Param::Threshold)?),
        ),
        other => Err(LexnetError::Config(format!("unknown task {other}"))),
    }
}

fn pair_task(cli: &Cli, contract: &TaskContract, params: &Params, graph: &EntityGraph) -> Result<Body> {
    let pairs = load_pairs(required(cli.pairs.as_ref(), "pairs")?)?;
    let query = if contract.task == 7 {
        PairQuery::Reachable {
            max_distance: params.get(Param::MaximalDistance)?,
        }
    } else {
        PairQuery::ExactPath {
            length: params.get(Param::FixedLength)?,
        }
    };
    keyed("Pair Matches", answer_pairs(graph, &pairs, query))
}
