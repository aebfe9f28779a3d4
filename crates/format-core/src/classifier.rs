use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::LazyLock;

/// How a numeric leaf should be rendered, decided from the name of the key
/// that directly encloses it. Upstream payloads carry no type metadata:
/// ratios arrive as raw fractions while monetary and count fields arrive as
/// literal magnitudes, so the field name is the only signal of intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldCategory {
    /// Comma-grouped dollar string.
    Dollar,
    /// Plain two-decimal number (valuation multiples, turnover ratios).
    Multiple,
    /// Left numeric, never percent-formatted (per-share metrics, counts).
    NonPercent,
    /// Raw fraction scaled to a percent string.
    Percent,
}

impl FieldCategory {
    pub fn label(&self) -> &'static str {
        match self {
            FieldCategory::Dollar => "dollar",
            FieldCategory::Multiple => "multiple",
            FieldCategory::NonPercent => "non-percent",
            FieldCategory::Percent => "percent",
        }
    }
}

// Field-name tables are stored pre-normalized: lowercase, underscores
// stripped. Several per-share names also appear in NON_PERCENT_FIELDS;
// the lookup order below makes the dollar entry win.

const DOLLAR_FIELDS: &[&str] = &[
    // Income statement
    "revenue", "costofrevenue", "grossprofit", "researchanddevelopmentexpenses",
    "generalandadministrativeexpenses", "sellingandmarketingexpenses",
    "sellinggeneralandadministrativeexpenses", "otherexpenses",
    "operatingexpenses", "costandexpenses", "interestincome", "interestexpense",
    "depreciationandamortization", "ebitda", "ebit", "operatingincome",
    "totalotherincomeexpensesnet", "incomebeforetax", "incometaxexpense",
    "netincome",
    // Balance sheet
    "cashandcashequivalents", "shortterminvestments",
    "cashandshortterminvestments", "netreceivables", "inventory",
    "othercurrentassets", "totalcurrentassets", "propertyplantequipmentnet",
    "goodwill", "intangibleassets", "goodwillandintangibleassets",
    "longterminvestments", "taxassets", "othernoncurrentassets",
    "totalnoncurrentassets", "otherassets", "totalassets", "accountpayables",
    "shorttermdebt", "taxpayables", "deferredrevenue",
    "othercurrentliabilities", "totalcurrentliabilities", "longtermdebt",
    "deferredrevenuenoncurrent", "deferredtaxliabilitiesnoncurrent",
    "othernoncurrentliabilities", "totalnoncurrentliabilities",
    "otherliabilities", "capitalleaseobligations", "totalliabilities",
    "preferredstock", "commonstock", "retainedearnings",
    "accumulatedothercomprehensiveincomeloss", "othertotalstockholdersequity",
    "totalstockholdersequity", "totalequity",
    "totalliabilitiesandstockholdersequity", "minorityinterest",
    "totalliabilitiesandtotalequity", "totalinvestments", "totaldebt",
    "netdebt",
    // Cash flow statement
    "deferredincometax", "stockbasedcompensation", "changeinworkingcapital",
    "accountsreceivables", "accountspayables", "otherworkingcapital",
    "othernoncashitems", "netcashprovidedbyoperatingactivities",
    "investmentsinpropertyplantandequipment", "acquisitionsnet",
    "purchasesofinvestments", "salesmaturitiesofinvestments",
    "otherinvestingactivites", "netcashusedforinvestingactivites",
    "debtrepayment", "commonstockissued", "commonstockrepurchased",
    "dividendspaid", "otherfinancingactivites",
    "netcashusedprovidedbyfinancingactivities", "effectofforexchangesoncash",
    "netchangeincash", "cashatendofperiod", "cashatbeginningofperiod",
    "operatingcashflow", "capitalexpenditure", "freecashflow",
    // Quote fields
    "price", "marketcap", "volume", "avgvolume", "previousclose", "open",
    "dayhigh", "daylow", "yearhigh", "yearlow", "priceavg50", "priceavg200",
    "change",
    // Large aggregates
    "enterprisevalue", "enterprisevaluettm", "workingcapital",
    "workingcapitalttm", "tangibleassetvalue", "tangibleassetvaluettm",
    "netcurrentassetvalue", "netcurrentassetvaluettm", "investedcapital",
    "investedcapitalttm", "marketcapttm", "revenuettm", "netincomettm",
    "ebitdattm", "operatingcashflowttm", "freecashflowttm",
    // Per-share dollar metrics (also in NON_PERCENT_FIELDS; dollar wins)
    "revenuepershare", "revenuepersharettm", "netincomepershare",
    "netincomepersharettm", "operatingcashflowpershare",
    "operatingcashflowpersharettm", "freecashflowpershare",
    "freecashflowpersharettm", "cashpershare", "cashpersharettm",
    "bookvaluepershare", "bookvaluepersharettm", "tangiblebookvaluepershare",
    "tangiblebookvaluepersharettm", "shareholdersequitypershare",
    "shareholdersequitypersharettm", "interestdebtpershare",
    "interestdebtpersharettm", "capexpershare", "capexpersharettm",
];

const MULTIPLE_FIELDS: &[&str] = &[
    // Valuation multiples
    "peratio", "peratiottm", "pegratio", "pegratiottm", "pricetosalesratio",
    "pricetosalesratiottm", "pocfratio", "pocfratiottm", "pfcfratio",
    "pfcfratiottm", "pbratio", "pbratiottm", "ptbratio", "ptbratiottm",
    "evtosales", "evtosalesttm", "enterprisevalueoverebitda",
    "enterprisevalueoverebitdattm", "evtoebitda", "evtoebitdattm",
    "evtooperatingcashflow", "evtooperatingcashflowttm", "evtofreecashflow",
    "evtofreecashflowttm", "priceearningsratio", "pricetobookratio",
    "pricebookvalueratio", "pricetofreecashflowsratio",
    "pricetooperatingcashflowsratio", "pricecashflowratio",
    "priceearningstogrowthratio", "pricesalesratio", "pricefairvalue",
    "enterprisevaluemultiple",
    // Leverage and coverage
    "debttoequity", "debttoequityttm", "debtequityratio", "debttoassets",
    "debttoassetsttm", "debtratio", "netdebttoebitda", "netdebttoebitdattm",
    "longtermdebttocapitalization", "totaldebttocapitalization",
    "interestcoverage", "interestcoveragettm", "cashflowtodebtratio",
    "companyequitymultiplier", "cashflowcoverageratios",
    "shorttermcoverageratios", "capitalexpenditurecoverageratio",
    "dividendpaidandcapexcoverageratio",
    // Liquidity, turnover, efficiency
    "currentratio", "currentratiottm", "quickratio", "quickratiottm",
    "cashratio", "cashratiottm", "receivablesturnover",
    "receivablesturnoverttm", "payablesturnover", "payablesturnoverttm",
    "inventoryturnover", "inventoryturnoverttm", "fixedassetturnover",
    "assetturnover", "daysofsalesoutstanding", "dayssalesoutstanding",
    "daysofpayablesoutstanding", "dayspayablesoutstanding",
    "daysofinventoryoutstanding", "daysofinventoryonhand", "operatingcycle",
    "cashconversioncycle", "incomequality", "incomequalityttm",
    "capextooperatingcashflow", "capextooperatingcashflowttm",
    "capextorevenue", "capextorevenuettm", "capextodepreciation",
    "capextodepreciationttm", "netincomeperebt", "ebtperebit",
];

const NON_PERCENT_FIELDS: &[&str] = &[
    // EPS variants
    "eps", "epsttm", "epsdiluted", "epsdilutedttm",
    // Per-share metrics
    "netincomepershare", "netincomepersharettm", "revenuepershare",
    "revenuepersharettm", "operatingcashflowpershare",
    "operatingcashflowpersharettm", "freecashflowpershare",
    "freecashflowpersharettm", "cashpershare", "cashpersharettm",
    "bookvaluepershare", "bookvaluepersharettm", "tangiblebookvaluepershare",
    "tangiblebookvaluepersharettm", "shareholdersequitypershare",
    "shareholdersequitypersharettm", "interestdebtpershare",
    "interestdebtpersharettm", "capexpershare", "capexpersharettm",
    "dividendpershare", "dividendpersharettm",
    // Share counts
    "weightedaverageshsout", "weightedaverageshsoutdil", "sharesoutstanding",
    // Graham valuations
    "grahamnumber", "grahamnumberttm", "grahamnetnet", "grahamnetnetttm",
    // Average balance items
    "averagereceivables", "averagereceivablesttm", "averagepayables",
    "averagepayablesttm", "averageinventory", "averageinventoryttm",
];

static DOLLAR_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| DOLLAR_FIELDS.iter().copied().collect());
static MULTIPLE_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| MULTIPLE_FIELDS.iter().copied().collect());
static NON_PERCENT_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| NON_PERCENT_FIELDS.iter().copied().collect());

/// Map a field name to its format category.
///
/// Names are compared case-insensitively with underscores stripped, so
/// `net_income`, `netIncome` and `NETINCOME` all resolve the same way.
/// Lookup order: dollar, multiple, non-percent, then percent by default.
pub fn classify(key: &str) -> FieldCategory {
    let lower = key.to_lowercase();
    let normalized = lower.replace('_', "");

    if DOLLAR_SET.contains(normalized.as_str()) {
        FieldCategory::Dollar
    } else if MULTIPLE_SET.contains(normalized.as_str()) {
        FieldCategory::Multiple
    } else if is_share_like(&lower, &normalized) {
        FieldCategory::NonPercent
    } else {
        FieldCategory::Percent
    }
}

/// Growth fields are always percent-formatted, even when the rest of the
/// name would match a per-share or share-count pattern. The `eps` / `shsout`
/// substring checks run on the un-stripped lowercase key and catch variants
/// the table does not enumerate (`dilutedEPS`, `weightedAverageShsOutDil`).
fn is_share_like(lower: &str, normalized: &str) -> bool {
    if lower.starts_with("growth") {
        return false;
    }
    NON_PERCENT_SET.contains(normalized) || lower.contains("eps") || lower.contains("shsout")
}
