use super::entries::{self, EntryKind, ZoneEntry};
use dnstest_domain::FixtureError;
use crate::dns::SPF;
use hickory_proto::rr::rdata::NULL;
use hickory_proto::rr::{LowerName, Name, RData, Record, RecordType};
use hickory_proto::serialize::binary::BinEncodable;
use hickory_proto::serialize::txt::Parser;
use tracing::debug;

/// An immutable, ordered set of records served by a test server.
///
/// Owner names are lowercased on the way in so that lookups are a plain
/// equality check against the lowercased query name.
#[derive(Debug, Clone, Default)]
pub struct ZoneRecords {
    records: Vec<OwnedRecord>,
}

#[derive(Debug, Clone)]
struct OwnedRecord {
    owner: LowerName,
    record: Record,
}

/// State carried from one entry to the next while loading zone text
#[derive(Default)]
struct LoadContext {
    origin: Option<String>,
    ttl: Option<String>,
    last_owner: Option<Name>,
    last_ttl: Option<u32>,
}

/// One record entry rendered as standalone zone text
struct EntrySource {
    text: String,
    spf: bool,
}

impl ZoneRecords {
    /// Parses zone text, one record per line, in standard zone-file syntax.
    ///
    /// Records keep the order they appear in. `$ORIGIN` and `$TTL` apply to
    /// the lines after them; the default origin is the root. A record line
    /// without a class is read as `IN`.
    ///
    /// Any malformed line fails the whole load with
    /// [`FixtureError::InvalidZone`] carrying the line it started on.
    pub fn parse(text: &str) -> Result<Self, FixtureError> {
        let mut records = Vec::new();
        let mut context = LoadContext::default();

        for entry in entries::split(text)? {
            match entry.kind {
                EntryKind::Origin => context.origin = Some(entry.text),
                EntryKind::Ttl => context.ttl = Some(entry.text),
                EntryKind::Record { owner_omitted } => {
                    let source = context.source_for(&entry, owner_omitted)?;
                    let mut parsed = parse_entry(&source.text, entry.line)?;
                    if source.spf {
                        parsed = parsed
                            .into_iter()
                            .map(|record| txt_as_spf(record, entry.line))
                            .collect::<Result<_, _>>()?;
                    }

                    if let Some(last) = parsed.last() {
                        context.last_owner = Some(last.name().clone());
                        context.last_ttl = Some(last.ttl());
                    }
                    records.extend(parsed);
                }
            }
        }

        let zone = Self::from_records(records);
        debug!(records = zone.len(), "Zone text loaded");
        Ok(zone)
    }

    /// Builds a record set from already-typed records, in iteration order.
    ///
    /// Useful for record types the text parser has no mnemonic for.
    pub fn from_records(records: impl IntoIterator<Item = Record>) -> Self {
        let records = records
            .into_iter()
            .map(|mut record| {
                let owner = record.name().to_lowercase();
                record.set_name(owner.clone());
                OwnedRecord {
                    owner: LowerName::new(&owner),
                    record,
                }
            })
            .collect();

        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.iter().map(|owned| &owned.record)
    }

    /// Records answering a `query_type` question for `name`, in load order.
    pub fn lookup<'a>(
        &'a self,
        name: &'a LowerName,
        query_type: RecordType,
    ) -> impl Iterator<Item = &'a Record> + 'a {
        crate::dns::matcher::select(self.owned(), name, query_type)
    }

    pub(crate) fn owned(&self) -> impl Iterator<Item = (&LowerName, &Record)> {
        self.records
            .iter()
            .map(|owned| (&owned.owner, &owned.record))
    }
}

impl LoadContext {
    fn source_for(
        &self,
        entry: &ZoneEntry,
        owner_omitted: bool,
    ) -> Result<EntrySource, FixtureError> {
        let mut source = String::with_capacity(entry.text.len() + 64);

        if let Some(origin) = &self.origin {
            source.push_str(origin);
            source.push('\n');
        }
        match (&self.ttl, self.last_ttl) {
            (Some(ttl), _) => {
                source.push_str(ttl);
                source.push('\n');
            }
            (None, Some(last_ttl)) => {
                source.push_str(&format!("$TTL {}\n", last_ttl));
            }
            (None, None) => {}
        }

        let record = if owner_omitted {
            let owner = self.last_owner.as_ref().ok_or_else(|| FixtureError::InvalidZone {
                line: entry.line,
                message: "record has no owner name and no previous record".to_string(),
            })?;
            format!("{}{}", owner, entry.text)
        } else {
            entry.text.clone()
        };

        let record = entries::with_default_class(&record);
        let spf = entries::spf_as_txt(&record);
        source.push_str(spf.as_deref().unwrap_or(&record[..]));
        source.push('\n');

        Ok(EntrySource {
            text: source,
            spf: spf.is_some(),
        })
    }
}

fn parse_entry(source: &str, line: usize) -> Result<Vec<Record>, FixtureError> {
    let parser = Parser::new(source, None, Some(Name::root()));
    let (_origin, rrsets) = parser.parse().map_err(|e| FixtureError::InvalidZone {
        line,
        message: e.to_string(),
    })?;

    Ok(rrsets
        .values()
        .flat_map(|rrset| rrset.records_without_rrsigs().cloned())
        .collect())
}

/// Re-types a TXT record parsed from an `SPF` line as type 99, keeping the
/// TXT wire form as its data.
fn txt_as_spf(record: Record, line: usize) -> Result<Record, FixtureError> {
    let rdata = record.data().to_bytes().map_err(|e| FixtureError::InvalidZone {
        line,
        message: format!("SPF data: {}", e),
    })?;

    let mut spf = Record::from_rdata(
        record.name().clone(),
        record.ttl(),
        RData::Unknown {
            code: SPF,
            rdata: NULL::with(rdata),
        },
    );
    spf.set_dns_class(record.dns_class());
    Ok(spf)
}
