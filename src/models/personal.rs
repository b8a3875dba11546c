//! Personal salary inputs.
//!
//! These are the per-invocation files handed to each command: the personal
//! info for `fund`/`insurance`, the monthly salary list for `tax` and the
//! simplified yearly plan for `year`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The monthly tax-free threshold in force since 2019.
pub const DEFAULT_THRESHOLD: Decimal = Decimal::from_parts(5000, 0, 0, false, 0);

/// The largest amount or rate accepted in any input, one trillion.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0);

fn default_threshold() -> Decimal {
    DEFAULT_THRESHOLD
}

/// Household registration type; selects the unemployment table.
///
/// Accepts the names below or the numeric codes `0` and `1`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "FlagValue")]
pub enum ResidenceType {
    /// Urban (non-agricultural) residence.
    #[default]
    NonAgricultural,
    /// Rural (agricultural) residence.
    Agricultural,
}

/// Pension scheme; selects the endowment table.
///
/// Accepts the names below or the numeric codes `0` and `1`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "FlagValue")]
pub enum EndowmentType {
    /// Enterprise workers.
    #[default]
    Workers,
    /// Government and public institution staff.
    Office,
}

/// A category flag as written in an input file: a numeric code or a name.
#[derive(Deserialize)]
#[serde(untagged)]
enum FlagValue {
    Code(u64),
    Name(String),
}

impl FlagValue {
    /// Resolves to the index of `names`, matching either the code or the name.
    fn position(&self, names: [&str; 2]) -> Option<usize> {
        match self {
            FlagValue::Code(code) => usize::try_from(*code).ok().filter(|c| *c < names.len()),
            FlagValue::Name(name) => {
                let name = name.trim();
                names
                    .iter()
                    .position(|n| *n == name)
                    .or_else(|| name.parse::<usize>().ok().filter(|c| *c < names.len()))
            }
        }
    }

    fn describe(&self) -> String {
        match self {
            FlagValue::Code(code) => code.to_string(),
            FlagValue::Name(name) => name.clone(),
        }
    }
}

impl TryFrom<FlagValue> for ResidenceType {
    type Error = String;

    fn try_from(value: FlagValue) -> Result<Self, Self::Error> {
        const NAMES: [&str; 2] = ["non_agricultural", "agricultural"];
        match value.position(NAMES) {
            Some(0) => Ok(ResidenceType::NonAgricultural),
            Some(_) => Ok(ResidenceType::Agricultural),
            None => Err(format!(
                "unknown residence `{}`, expected 0, 1, `{}` or `{}`",
                value.describe(),
                NAMES[0],
                NAMES[1]
            )),
        }
    }
}

impl TryFrom<FlagValue> for EndowmentType {
    type Error = String;

    fn try_from(value: FlagValue) -> Result<Self, Self::Error> {
        const NAMES: [&str; 2] = ["workers", "office"];
        match value.position(NAMES) {
            Some(0) => Ok(EndowmentType::Workers),
            Some(_) => Ok(EndowmentType::Office),
            None => Err(format!(
                "unknown endowment `{}`, expected 0, 1, `{}` or `{}`",
                value.describe(),
                NAMES[0],
                NAMES[1]
            )),
        }
    }
}

/// One month of salary inputs.
///
/// Category bases that are left out fall back to `salary`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryBase {
    /// Monthly tax-free threshold.
    #[serde(default = "default_threshold")]
    pub threshold: Decimal,
    /// Gross monthly salary.
    pub salary: Decimal,
    /// Taxable subsidies paid on top of the salary.
    #[serde(default)]
    pub subsidy_amount: Decimal,
    /// Special additional deductions (children, housing loan, elderly care...).
    #[serde(default)]
    pub deductible_amount: Decimal,
    /// Housing fund rate, in percent.
    #[serde(default)]
    pub accumulation_fund_rate: Decimal,
    /// Housing fund base, if different from the salary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accumulation_fund_base: Option<Decimal>,
    /// Pension base.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endowment_base: Option<Decimal>,
    /// Medical insurance base.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medical_base: Option<Decimal>,
    /// Unemployment insurance base.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unemployment_base: Option<Decimal>,
    /// Employment injury insurance base.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employment_injury_base: Option<Decimal>,
    /// Maternity insurance base.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_base: Option<Decimal>,
    /// Serious illness insurance base.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serious_medical_base: Option<Decimal>,
}

impl SalaryBase {
    /// Creates a month where every base equals `salary`.
    ///
    /// # Example
    ///
    /// ```
    /// use tax_engine::models::{SalaryBase, DEFAULT_THRESHOLD};
    /// use rust_decimal::Decimal;
    ///
    /// let month = SalaryBase::from_salary(Decimal::new(20000, 0), Decimal::new(12, 0));
    /// assert_eq!(month.threshold, DEFAULT_THRESHOLD);
    /// assert_eq!(month.resolve_base(month.medical_base), Decimal::new(20000, 0));
    /// ```
    pub fn from_salary(salary: Decimal, accumulation_fund_rate: Decimal) -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            salary,
            subsidy_amount: Decimal::ZERO,
            deductible_amount: Decimal::ZERO,
            accumulation_fund_rate,
            accumulation_fund_base: None,
            endowment_base: None,
            medical_base: None,
            unemployment_base: None,
            employment_injury_base: None,
            birth_base: None,
            serious_medical_base: None,
        }
    }

    /// Returns the declared base, or the salary when none was declared.
    pub fn resolve_base(&self, declared: Option<Decimal>) -> Decimal {
        declared.unwrap_or(self.salary)
    }

    /// Rejects negative amounts and amounts above [`MAX_AMOUNT`].
    pub fn validate(&self) -> EngineResult<()> {
        let amounts = [
            ("threshold", Some(self.threshold)),
            ("salary", Some(self.salary)),
            ("subsidy_amount", Some(self.subsidy_amount)),
            ("deductible_amount", Some(self.deductible_amount)),
            ("accumulation_fund_rate", Some(self.accumulation_fund_rate)),
            ("accumulation_fund_base", self.accumulation_fund_base),
            ("endowment_base", self.endowment_base),
            ("medical_base", self.medical_base),
            ("unemployment_base", self.unemployment_base),
            ("employment_injury_base", self.employment_injury_base),
            ("birth_base", self.birth_base),
            ("serious_medical_base", self.serious_medical_base),
        ];
        check_amounts(&amounts)
    }
}

fn check_amounts(amounts: &[(&str, Option<Decimal>)]) -> EngineResult<()> {
    for (field, value) in amounts {
        let Some(value) = value else { continue };
        let message = if *value < Decimal::ZERO {
            format!("{} is negative", value)
        } else if *value > MAX_AMOUNT {
            format!("{} exceeds the largest accepted amount {}", value, MAX_AMOUNT)
        } else {
            continue;
        };
        return Err(EngineError::InvalidPersonalInfo {
            field: field.to_string(),
            message,
        });
    }
    Ok(())
}

/// Personal information for the `fund` and `insurance` commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalInfo {
    /// Household registration type.
    #[serde(default)]
    pub residence: ResidenceType,
    /// Pension scheme.
    #[serde(default)]
    pub endowment: EndowmentType,
    /// Salary and bases, inlined at the top level of the file.
    #[serde(flatten)]
    pub salary: SalaryBase,
}

impl PersonalInfo {
    /// Creates personal info with default residence and pension scheme.
    pub fn new(salary: SalaryBase) -> Self {
        Self {
            residence: ResidenceType::default(),
            endowment: EndowmentType::default(),
            salary,
        }
    }
}

/// Monthly salaries for the `tax` command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Salaries {
    /// Repeat the last month until December.
    #[serde(default, alias = "for")]
    pub project_full_year: bool,
    /// Household registration type.
    #[serde(default)]
    pub residence: ResidenceType,
    /// Pension scheme.
    #[serde(default)]
    pub endowment: EndowmentType,
    /// One entry per month, starting in January.
    pub monthly_salaries: Vec<SalaryBase>,
}

/// Flat contribution settings used by the `year` command when a month does
/// not state its insurance or housing fund amount.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsurancesAndFund {
    /// Housing fund base.
    pub accumulation_fund_base: Decimal,
    /// Housing fund rate, in percent.
    pub accumulation_fund_rate: Decimal,
    /// Base shared by every insurance category.
    pub insurances_base: Decimal,
    /// Pension rate, in percent.
    pub endowment_insurance_rate: Decimal,
    /// Medical rate, in percent.
    pub medical_rate: Decimal,
    /// Unemployment rate, in percent.
    pub unemployment_insurance_rate: Decimal,
    /// Employment injury rate, in percent.
    pub employment_injury_insurance_rate: Decimal,
    /// Maternity rate, in percent.
    pub birth_insurance_rate: Decimal,
}

impl InsurancesAndFund {
    /// Sum of the insurance rates, in percent.
    pub fn total_insurance_rate(&self) -> Decimal {
        self.endowment_insurance_rate
            + self.medical_rate
            + self.unemployment_insurance_rate
            + self.employment_injury_insurance_rate
            + self.birth_insurance_rate
    }

    /// Rejects negative amounts and amounts above [`MAX_AMOUNT`].
    pub fn validate(&self) -> EngineResult<()> {
        let amounts = [
            ("accumulation_fund_base", Some(self.accumulation_fund_base)),
            ("accumulation_fund_rate", Some(self.accumulation_fund_rate)),
            ("insurances_base", Some(self.insurances_base)),
            ("endowment_insurance_rate", Some(self.endowment_insurance_rate)),
            ("medical_rate", Some(self.medical_rate)),
            ("unemployment_insurance_rate", Some(self.unemployment_insurance_rate)),
            ("employment_injury_insurance_rate", Some(self.employment_injury_insurance_rate)),
            ("birth_insurance_rate", Some(self.birth_insurance_rate)),
        ];
        check_amounts(&amounts)
    }
}

/// The `global` block of a yearly plan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearGlobal {
    /// Repeat the last month until December.
    #[serde(default, alias = "for")]
    pub project_full_year: bool,
    /// Flat contribution settings, inlined.
    #[serde(flatten)]
    pub contributions: InsurancesAndFund,
}

/// One month of the simplified yearly plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthSalary {
    /// Monthly tax-free threshold.
    #[serde(default = "default_threshold")]
    pub threshold: Decimal,
    /// Gross monthly salary.
    pub salary: Decimal,
    /// Taxable subsidies.
    #[serde(default)]
    pub subsidy_amount: Decimal,
    /// Insurance paid this month; derived from `global` when absent or zero.
    #[serde(default)]
    pub insurance: Option<Decimal>,
    /// Housing fund paid this month; derived from `global` when absent or zero.
    #[serde(default)]
    pub accumulation_fund: Option<Decimal>,
    /// Special additional deductions.
    #[serde(default)]
    pub deductible_amount: Decimal,
}

impl MonthSalary {
    /// Rejects negative amounts and amounts above [`MAX_AMOUNT`].
    pub fn validate(&self) -> EngineResult<()> {
        let amounts = [
            ("threshold", Some(self.threshold)),
            ("salary", Some(self.salary)),
            ("subsidy_amount", Some(self.subsidy_amount)),
            ("insurance", self.insurance),
            ("accumulation_fund", self.accumulation_fund),
            ("deductible_amount", Some(self.deductible_amount)),
        ];
        check_amounts(&amounts)
    }
}

/// The `year` command input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearPlan {
    /// Projection flag and flat contribution settings.
    #[serde(default)]
    pub global: YearGlobal,
    /// One entry per month, starting in January.
    pub salaries: Vec<MonthSalary>,
}
