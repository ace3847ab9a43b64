use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, Result};
use crate::models::TransactionType;

/// Tertiary categories that mark a movement between the user's own accounts.
pub const TRANSFER_CATEGORIES: &[&str] = &["转账", "信用卡还款", "账户互转"];

/// Secondary category assigned to every transfer.
pub const TRANSFER_SECONDARY: &str = "转账";

/// Secondary category used when no mapping was found.
pub const UNMAPPED_SECONDARY: &str = "未分类";

pub const BALANCE_ADJUSTMENT: &str = "余额调整";
pub const INCOME_ADJUSTMENT: &str = "收入调整";
pub const EXPENSE_ADJUSTMENT: &str = "支出调整";
pub const OTHER_INCOME: &str = "其他收入";
pub const OTHER_EXPENSE: &str = "其他支出";

type Entry = (TransactionType, &'static str, &'static str, &'static [&'static str]);

const DEFAULT_TABLE: &[Entry] = &[
    (TransactionType::Expense, "餐饮", "日常餐饮", &["早餐", "午餐", "晚餐", "外卖", "夜宵"]),
    (TransactionType::Expense, "餐饮", "饮品零食", &["咖啡", "奶茶", "零食", "水果"]),
    (TransactionType::Expense, "交通", "公共交通", &["地铁", "公交", "火车", "飞机"]),
    (TransactionType::Expense, "交通", "私家车", &["加油", "停车费", "过路费", "车辆保养"]),
    (TransactionType::Expense, "交通", "打车", &["出租车", "网约车"]),
    (TransactionType::Expense, "居住", "住房", &["房租", "房贷", "物业费"]),
    (TransactionType::Expense, "居住", "生活缴费", &["水电煤", "通讯费", "宽带"]),
    (TransactionType::Expense, "购物", "日用", &["日用品", "超市"]),
    (TransactionType::Expense, "购物", "服饰", &["衣服", "鞋包"]),
    (TransactionType::Expense, "购物", "数码", &["电子产品"]),
    (TransactionType::Expense, "医疗", "医疗保健", &["门诊", "药品", "体检"]),
    (TransactionType::Expense, "保险", "保险保障", &["保险", "医疗保险", "车险"]),
    (TransactionType::Expense, "娱乐", "休闲娱乐", &["电影", "游戏", "旅游", "运动"]),
    (TransactionType::Expense, "教育", "学习", &["书籍", "课程", "培训"]),
    (TransactionType::Expense, OTHER_EXPENSE, BALANCE_ADJUSTMENT, &[EXPENSE_ADJUSTMENT]),
    (TransactionType::Expense, OTHER_EXPENSE, "杂项", &["手续费", "其他"]),
    (TransactionType::Income, "工资收入", "工资", &["工资", "奖金", "加班费"]),
    (TransactionType::Income, "投资收益", "理财", &["利息", "基金", "股票", "分红"]),
    (TransactionType::Income, "兼职收入", "副业", &["兼职", "稿费", "咨询"]),
    (TransactionType::Income, OTHER_INCOME, BALANCE_ADJUSTMENT, &[INCOME_ADJUSTMENT]),
    (TransactionType::Income, OTHER_INCOME, "杂项收入", &["红包", "退款", "报销", "其他收入"]),
];

/// primary -> secondary -> tertiaries, as stored on disk.
pub type CategoryTree = BTreeMap<String, BTreeMap<String, Vec<String>>>;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaxonomyFile {
    #[serde(default)]
    pub income: CategoryTree,
    #[serde(default)]
    pub expense: CategoryTree,
}

/// Resolved position of a category inside the taxonomy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mapping {
    pub secondary: String,
    pub tertiary: String,
}

#[derive(Debug, Clone)]
struct Node {
    primary: String,
    secondary: String,
    tertiaries: Vec<String>,
}

/// Immutable three-level category lookup, built once and shared by reference.
#[derive(Debug, Clone)]
pub struct CategoryTaxonomy {
    nodes: Vec<(TransactionType, Node)>,
    by_tertiary: HashMap<(TransactionType, String), Vec<usize>>,
    by_secondary: HashMap<(TransactionType, String), Vec<usize>>,
}

impl CategoryTaxonomy {
    pub fn builtin() -> Self {
        Self::from_nodes(DEFAULT_TABLE.iter().map(|(ty, p, s, ts)| {
            (
                *ty,
                Node {
                    primary: p.to_string(),
                    secondary: s.to_string(),
                    tertiaries: ts.iter().map(|t| t.to_string()).collect(),
                },
            )
        }))
    }

    pub fn from_file(file: TaxonomyFile) -> Result<Self> {
        let mut nodes = Vec::new();
        for (ty, tree) in [
            (TransactionType::Income, file.income),
            (TransactionType::Expense, file.expense),
        ] {
            for (primary, secondaries) in tree {
                for (secondary, tertiaries) in secondaries {
                    if tertiaries.is_empty() {
                        return Err(LedgerError::Taxonomy(format!(
                            "secondary category '{secondary}' under '{primary}' has no tertiary categories"
                        )));
                    }
                    nodes.push((
                        ty,
                        Node {
                            primary: primary.clone(),
                            secondary,
                            tertiaries,
                        },
                    ));
                }
            }
        }
        if nodes.is_empty() {
            return Err(LedgerError::Taxonomy("taxonomy defines no categories".to_string()));
        }
        Ok(Self::from_nodes(nodes))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_file(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    fn from_nodes(nodes: impl IntoIterator<Item = (TransactionType, Node)>) -> Self {
        let nodes: Vec<_> = nodes.into_iter().collect();
        let mut by_tertiary: HashMap<_, Vec<usize>> = HashMap::new();
        let mut by_secondary: HashMap<_, Vec<usize>> = HashMap::new();
        for (i, (ty, node)) in nodes.iter().enumerate() {
            by_secondary.entry((*ty, node.secondary.clone())).or_default().push(i);
            for t in &node.tertiaries {
                by_tertiary.entry((*ty, t.clone())).or_default().push(i);
            }
        }
        Self {
            nodes,
            by_tertiary,
            by_secondary,
        }
    }

    /// Prefer a node under `primary`; otherwise take the first candidate.
    fn pick(&self, candidates: Option<&Vec<usize>>, primary: &str) -> Option<&Node> {
        let candidates = candidates?;
        candidates
            .iter()
            .map(|&i| &self.nodes[i].1)
            .find(|n| n.primary == primary)
            .or_else(|| candidates.first().map(|&i| &self.nodes[i].1))
    }

    /// Find the secondary category that owns `tertiary`.
    pub fn secondary_for(&self, ty: TransactionType, primary: &str, tertiary: &str) -> Option<&str> {
        self.pick(self.by_tertiary.get(&(ty, tertiary.to_string())), primary)
            .map(|n| n.secondary.as_str())
    }

    /// Treat `name` as a secondary category and return its first tertiary.
    pub fn first_tertiary_of(&self, ty: TransactionType, primary: &str, name: &str) -> Option<&str> {
        self.pick(self.by_secondary.get(&(ty, name.to_string())), primary)
            .and_then(|n| n.tertiaries.first())
            .map(String::as_str)
    }

    /// Resolve a supplied tertiary value: first as a tertiary, then as a
    /// mislabelled secondary.
    pub fn resolve(&self, ty: TransactionType, primary: &str, value: &str) -> Option<Mapping> {
        if let Some(secondary) = self.secondary_for(ty, primary, value) {
            return Some(Mapping {
                secondary: secondary.to_string(),
                tertiary: value.to_string(),
            });
        }
        self.first_tertiary_of(ty, primary, value).map(|t| Mapping {
            secondary: value.to_string(),
            tertiary: t.to_string(),
        })
    }

    pub fn to_file(&self) -> TaxonomyFile {
        let mut file = TaxonomyFile::default();
        for (ty, node) in &self.nodes {
            let tree = match ty {
                TransactionType::Income => &mut file.income,
                _ => &mut file.expense,
            };
            tree.entry(node.primary.clone())
                .or_default()
                .insert(node.secondary.clone(), node.tertiaries.clone());
        }
        file
    }
}

impl Default for CategoryTaxonomy {
    fn default() -> Self {
        Self::builtin()
    }
}

pub fn is_transfer_category(tertiary: &str) -> bool {
    TRANSFER_CATEGORIES.contains(&tertiary)
}
