// ABOUTME: The attribute table mapping feed attribute names to entry fields.
// ABOUTME: Each recognised name carries its domain and a parsing applier.

use std::collections::HashMap;

use chrono::TimeZone;
use once_cell::sync::Lazy;
use url::Url;
use uuid::Uuid;

use crate::error::Error;
use crate::models::Entry;
use crate::time_parse::parse_feed_date;

/// Which part of an entry an attribute belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrDomain {
    /// Title-level categorisation: category, genre, info.
    General,
    /// Entry identity and engagement: guid, comments, grabs, usenetdate.
    Meta,
    /// TV or movie payload fields.
    Content,
    /// Downloadable-file fields.
    File,
}

type ApplyFn = fn(&mut Entry, &str, &str) -> Result<(), Error>;

struct AttrSpec {
    domain: AttrDomain,
    apply: ApplyFn,
}

/// The full set of recognised attributes. Names are matched exactly and
/// case-sensitively; anything else is skipped during decoding.
static ATTRIBUTES: Lazy<HashMap<&'static str, AttrSpec>> = Lazy::new(|| {
    let mut table: HashMap<&'static str, AttrSpec> = HashMap::new();
    let mut put = |name: &'static str, domain: AttrDomain, apply: ApplyFn| {
        table.insert(name, AttrSpec { domain, apply });
    };

    put("category", AttrDomain::General, apply_category);
    put("genre", AttrDomain::General, apply_genre);
    put("info", AttrDomain::General, apply_info);

    put("guid", AttrDomain::Meta, apply_guid);
    put("comments", AttrDomain::Meta, apply_comments);
    put("grabs", AttrDomain::Meta, apply_grabs);
    put("usenetdate", AttrDomain::Meta, apply_usenetdate);

    put("rating", AttrDomain::Content, apply_rating);
    put("tvtitle", AttrDomain::Content, apply_tvtitle);
    put("episode", AttrDomain::Content, apply_episode);
    put("season", AttrDomain::Content, apply_season);
    put("rageid", AttrDomain::Content, apply_rageid);
    put("tvdbid", AttrDomain::Content, apply_tvdbid);
    put("tvairdate", AttrDomain::Content, apply_tvairdate);
    put("imdb", AttrDomain::Content, apply_imdb);
    put("imdbtitle", AttrDomain::Content, apply_imdbtitle);
    put("imdbyear", AttrDomain::Content, apply_imdbyear);
    put("imdbscore", AttrDomain::Content, apply_imdbscore);
    put("coverurl", AttrDomain::Content, apply_coverurl);

    put("size", AttrDomain::File, apply_size);
    put("seeders", AttrDomain::File, apply_seeders);
    put("peers", AttrDomain::File, apply_peers);
    put("infohash", AttrDomain::File, apply_infohash);

    table
});

/// Classifies an attribute name into its domain. Returns None for names
/// outside the recognised set.
pub fn classify(name: &str) -> Option<AttrDomain> {
    ATTRIBUTES.get(name).map(|spec| spec.domain)
}

/// Applies one raw name/value attribute to the entry being decoded.
///
/// Unrecognised names are skipped so indexer-specific extension attributes
/// never fail a decode; recognised names propagate any parse or
/// kind-conflict failure.
pub fn apply_attribute(entry: &mut Entry, name: &str, value: &str) -> Result<(), Error> {
    match ATTRIBUTES.get(name) {
        Some(spec) => (spec.apply)(entry, name, value),
        None => {
            tracing::debug!(name, value, "skipping unknown attribute");
            Ok(())
        }
    }
}

fn parse_number<T>(name: &str, input: &str, raw: &str) -> Result<T, Error>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    input.parse().map_err(|err| Error::attribute(name, raw, err))
}

fn parse_date_attribute(
    name: &str,
    value: &str,
) -> Result<chrono::DateTime<chrono::FixedOffset>, Error> {
    parse_feed_date(value).ok_or_else(|| {
        Error::attribute(
            name,
            value,
            anyhow::anyhow!("not one of RFC 3339, RFC 1123 with numeric zone"),
        )
    })
}

fn apply_category(entry: &mut Entry, _name: &str, value: &str) -> Result<(), Error> {
    entry
        .general
        .categorisation
        .category
        .push(value.to_string());
    Ok(())
}

fn apply_genre(entry: &mut Entry, _name: &str, value: &str) -> Result<(), Error> {
    entry.general.categorisation.genre = value.to_string();
    Ok(())
}

fn apply_info(entry: &mut Entry, _name: &str, value: &str) -> Result<(), Error> {
    entry.general.categorisation.info = value.to_string();
    Ok(())
}

fn apply_guid(entry: &mut Entry, name: &str, value: &str) -> Result<(), Error> {
    entry.meta.id = Uuid::parse_str(value).map_err(|err| Error::attribute(name, value, err))?;
    Ok(())
}

fn apply_comments(entry: &mut Entry, name: &str, value: &str) -> Result<(), Error> {
    entry.meta.comments.number = parse_number(name, value, value)?;
    Ok(())
}

fn apply_grabs(entry: &mut Entry, name: &str, value: &str) -> Result<(), Error> {
    entry.meta.grabs = parse_number(name, value, value)?;
    Ok(())
}

fn apply_usenetdate(entry: &mut Entry, name: &str, value: &str) -> Result<(), Error> {
    entry.meta.dates.usenet = Some(parse_date_attribute(name, value)?);
    Ok(())
}

fn apply_rating(entry: &mut Entry, name: &str, value: &str) -> Result<(), Error> {
    let tv = entry.tv_mut(name)?;
    tv.rating = parse_number(name, value, value)?;
    Ok(())
}

fn apply_tvtitle(entry: &mut Entry, name: &str, value: &str) -> Result<(), Error> {
    entry.tv_mut(name)?.canonical_title = value.to_string();
    Ok(())
}

/// Episode numbers may arrive with an `E` prefix or as an `a/b` fraction;
/// only the part after the slash counts.
fn apply_episode(entry: &mut Entry, name: &str, value: &str) -> Result<(), Error> {
    let tv = entry.tv_mut(name)?;
    let mut stripped = value.trim_matches(|c| matches!(c, 'e' | 'E'));
    if stripped.contains('/') {
        stripped = stripped.split('/').nth(1).unwrap_or_default();
    }
    tv.episode = parse_number(name, stripped, value)?;
    Ok(())
}

/// Season numbers may arrive with an `S` prefix, e.g. "S01".
fn apply_season(entry: &mut Entry, name: &str, value: &str) -> Result<(), Error> {
    let tv = entry.tv_mut(name)?;
    let stripped = value.trim_matches(|c| matches!(c, 's' | 'S'));
    tv.season = parse_number(name, stripped, value)?;
    Ok(())
}

fn apply_rageid(entry: &mut Entry, name: &str, value: &str) -> Result<(), Error> {
    let tv = entry.tv_mut(name)?;
    tv.tvrage_id = parse_number(name, value, value)?;
    Ok(())
}

fn apply_tvdbid(entry: &mut Entry, name: &str, value: &str) -> Result<(), Error> {
    let tv = entry.tv_mut(name)?;
    tv.tvdb_id = parse_number(name, value, value)?;
    Ok(())
}

fn apply_tvairdate(entry: &mut Entry, name: &str, value: &str) -> Result<(), Error> {
    entry.tv_mut(name)?;
    let date = parse_date_attribute(name, value)?;
    if let Some(content) = entry.content.as_mut() {
        content.set_aired(date);
    }
    Ok(())
}

fn apply_imdb(entry: &mut Entry, name: &str, value: &str) -> Result<(), Error> {
    let movie = entry.movie_mut(name)?;
    movie.imdb_id = parse_number(name, value, value)?;
    Ok(())
}

fn apply_imdbtitle(entry: &mut Entry, name: &str, value: &str) -> Result<(), Error> {
    entry.movie_mut(name)?.imdb_title = value.to_string();
    Ok(())
}

/// Release years arrive as a bare year; kept as January 1 of that year, UTC.
fn apply_imdbyear(entry: &mut Entry, name: &str, value: &str) -> Result<(), Error> {
    let movie = entry.movie_mut(name)?;
    let year: u32 = parse_number(name, value, value)?;
    let date = chrono::FixedOffset::east_opt(0)
        .and_then(|utc| utc.with_ymd_and_hms(year as i32, 1, 1, 0, 0, 0).single())
        .ok_or_else(|| Error::attribute(name, value, anyhow::anyhow!("year out of range")))?;
    movie.imdb_year = Some(date);
    Ok(())
}

fn apply_imdbscore(entry: &mut Entry, name: &str, value: &str) -> Result<(), Error> {
    let movie = entry.movie_mut(name)?;
    movie.imdb_score = parse_number(name, value, value)?;
    Ok(())
}

fn apply_coverurl(entry: &mut Entry, name: &str, value: &str) -> Result<(), Error> {
    let movie = entry.movie_mut(name)?;
    movie.cover = Some(Url::parse(value).map_err(|err| Error::attribute(name, value, err))?);
    Ok(())
}

fn apply_size(entry: &mut Entry, name: &str, value: &str) -> Result<(), Error> {
    let torrent = entry.torrent_mut(name)?;
    torrent.contents_size = parse_number(name, value, value)?;
    Ok(())
}

fn apply_seeders(entry: &mut Entry, name: &str, value: &str) -> Result<(), Error> {
    let torrent = entry.torrent_mut(name)?;
    torrent.seeders = parse_number(name, value, value)?;
    Ok(())
}

fn apply_peers(entry: &mut Entry, name: &str, value: &str) -> Result<(), Error> {
    let torrent = entry.torrent_mut(name)?;
    torrent.peers = parse_number(name, value, value)?;
    Ok(())
}

fn apply_infohash(entry: &mut Entry, name: &str, value: &str) -> Result<(), Error> {
    let torrent = entry.torrent_mut(name)?;
    torrent.info_hash = hex::decode(value).map_err(|err| Error::attribute(name, value, err))?;
    Ok(())
}
