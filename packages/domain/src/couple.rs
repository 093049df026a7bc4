//! # カップルレコード
//!
//! 2 人の名前と相性パーセンテージの組を表すドメインモデル。
//!
//! ## 含まれる型
//!
//! | 型 | 用途 |
//! |---|------|
//! | [`CoupleId`] | 外部ストアが採番する不透明な識別子 |
//! | [`PartnerName`] | トリム済みの空でない名前 |
//! | [`Percentage`] | 有限な数値のパーセンテージ |
//! | [`CoupleSubmission`] | 登録リクエストの生の入力 |
//! | [`NewCouple`] | 正規化済みの登録ペイロード |
//! | [`CoupleRecord`] | 外部ストアに保存されたレコード |
//!
//! ## 不変条件
//!
//! `NewCouple` は `name1` / `name2` が空の状態では生成できない。
//! 外部ストアへの登録は `NewCouple` 経由でのみ行うため、
//! 空の名前を持つレコードが作成されることはない。

use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::DomainError;

/// 名前が不足しているときのメッセージ
pub const NAMES_REQUIRED_MESSAGE: &str = "Both name1 and name2 are required";

/// パーセンテージが数値に変換できないときのメッセージ
pub const PERCENTAGE_NOT_NUMERIC_MESSAGE: &str = "percentage must be a number";

/// f64 で誤差なく表現できる整数の上限（2^53）
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

// =========================================================================
// CoupleId
// =========================================================================

/// カップルレコードの識別子
///
/// 外部ストアが採番する。列の型（bigint / uuid）に依存しないよう、
/// 整数と文字列のどちらもそのまま保持して返す。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CoupleId {
    Number(i64),
    Text(String),
}

// =========================================================================
// PartnerName
// =========================================================================

/// パートナー名（値オブジェクト）
///
/// # 不変条件
///
/// - 前後の空白はトリムされている
/// - 空文字列ではない
///
/// 文字数や文字種の制限はない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartnerName(String);

impl PartnerName {
    /// トリムしたうえで空でないことを検証して作成する
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into().trim().to_string();
        if value.is_empty() {
            return Err(DomainError::Validation(NAMES_REQUIRED_MESSAGE.to_string()));
        }
        Ok(Self(value))
    }

    /// 文字列参照を取得する
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 所有権を持つ文字列に変換する
    pub fn into_string(self) -> String {
        self.0
    }

    /// 任意の JSON 値から名前を作成する
    ///
    /// 値が存在しないか偽値（`null`, `false`, `0`, `""`）の場合は
    /// 必須エラーとする。数値と `true` は JSON 表記の文字列に変換する。
    /// オブジェクトと配列は名前として扱えないため必須エラーとする。
    pub fn coerce(value: Option<&Value>) -> Result<Self, DomainError> {
        let text = match value {
            Some(Value::String(s)) if !s.is_empty() => s.clone(),
            Some(Value::Number(n)) if n.as_f64().is_some_and(|f| f != 0.0) => n.to_string(),
            Some(Value::Bool(true)) => "true".to_string(),
            _ => return Err(DomainError::Validation(NAMES_REQUIRED_MESSAGE.to_string())),
        };
        Self::new(text)
    }
}

impl std::fmt::Display for PartnerName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// =========================================================================
// Percentage
// =========================================================================

/// 相性パーセンテージ（値オブジェクト）
///
/// # 不変条件
///
/// - 有限な数値（`NaN` / `Infinity` は保持しない）
///
/// 値域（0〜100 など）の制限はない。
///
/// # シリアライズ
///
/// 整数値は JSON の整数として出力する（`55.0` ではなく `55`）。
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Deserialize)]
#[serde(try_from = "f64")]
pub struct Percentage(f64);

impl Percentage {
    /// 有限であることを検証して作成する
    pub fn new(value: f64) -> Result<Self, DomainError> {
        if !value.is_finite() {
            return Err(DomainError::Validation(
                PERCENTAGE_NOT_NUMERIC_MESSAGE.to_string(),
            ));
        }
        Ok(Self(value))
    }

    /// 内部の f64 値を取得する
    pub fn as_f64(&self) -> f64 {
        self.0
    }

    /// 任意の JSON 値を数値に変換する
    ///
    /// | 入力 | 結果 |
    /// |------|------|
    /// | 数値 | そのまま |
    /// | 文字列 | 前後の空白を除いてパース（空文字列は 0） |
    /// | `true` / `false` | 1 / 0 |
    /// | `null` | 0 |
    /// | 上記以外、数値として解釈できない文字列 | バリデーションエラー |
    pub fn coerce(value: &Value) -> Result<Self, DomainError> {
        let number = match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    Some(0.0)
                } else {
                    trimmed.parse::<f64>().ok()
                }
            }
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Value::Null => Some(0.0),
            Value::Array(_) | Value::Object(_) => None,
        };

        match number {
            Some(n) => Self::new(n),
            None => Err(DomainError::Validation(
                PERCENTAGE_NOT_NUMERIC_MESSAGE.to_string(),
            )),
        }
    }
}

impl TryFrom<f64> for Percentage {
    type Error = DomainError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl Serialize for Percentage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0.fract() == 0.0 && self.0.abs() < MAX_SAFE_INTEGER {
            serializer.serialize_i64(self.0 as i64)
        } else {
            serializer.serialize_f64(self.0)
        }
    }
}

// =========================================================================
// CoupleSubmission
// =========================================================================

/// 登録リクエストの生の入力
///
/// 型変換前の JSON 値をそのまま保持する。
/// `percentage` はキーが存在しない場合 `None`、`null` の場合
/// `Some(Value::Null)` となり、両者を区別する。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoupleSubmission {
    pub name1:      Option<Value>,
    pub name2:      Option<Value>,
    pub percentage: Option<Value>,
}

impl CoupleSubmission {
    /// リクエストボディの JSON から作成する
    ///
    /// オブジェクト以外の JSON は空の入力として扱う。
    pub fn from_json(body: Value) -> Self {
        match body {
            Value::Object(mut map) => Self {
                name1:      map.remove("name1"),
                name2:      map.remove("name2"),
                percentage: map.remove("percentage"),
            },
            _ => Self::default(),
        }
    }
}

// =========================================================================
// NewCouple
// =========================================================================

/// 正規化済みの登録ペイロード
///
/// 外部ストアへの挿入行としてそのままシリアライズされる。
/// `percentage` が存在しない場合はキーごと出力しない。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewCouple {
    name1:      PartnerName,
    name2:      PartnerName,
    #[serde(skip_serializing_if = "Option::is_none")]
    percentage: Option<Percentage>,
}

impl NewCouple {
    /// 値オブジェクトから作成する
    pub fn new(name1: PartnerName, name2: PartnerName, percentage: Option<Percentage>) -> Self {
        Self {
            name1,
            name2,
            percentage,
        }
    }

    /// 生の入力を検証・正規化する
    ///
    /// 名前の検証を先に行い、名前が揃っている場合のみ
    /// パーセンテージを変換する。
    ///
    /// # エラー
    ///
    /// - 名前が不足している: [`NAMES_REQUIRED_MESSAGE`]
    /// - パーセンテージが数値でない: [`PERCENTAGE_NOT_NUMERIC_MESSAGE`]
    pub fn from_submission(submission: &CoupleSubmission) -> Result<Self, DomainError> {
        let name1 = PartnerName::coerce(submission.name1.as_ref())?;
        let name2 = PartnerName::coerce(submission.name2.as_ref())?;
        let percentage = submission
            .percentage
            .as_ref()
            .map(Percentage::coerce)
            .transpose()?;

        Ok(Self::new(name1, name2, percentage))
    }

    pub fn name1(&self) -> &PartnerName {
        &self.name1
    }

    pub fn name2(&self) -> &PartnerName {
        &self.name2
    }

    pub fn percentage(&self) -> Option<Percentage> {
        self.percentage
    }
}

// =========================================================================
// CoupleRecord
// =========================================================================

/// 外部ストアに保存されたカップルレコード
///
/// 外部ストアがスキーマとデータを所有するため、読み取り時には再検証しない。
/// 列の値はストアが返した表現のまま保持する。
///
/// - `name1` / `name2`: `null` の行も受け付ける
/// - `percentage`: 数値型の列をそのまま返す
/// - `created_at`: タイムゾーンなしの `timestamp` 列も受け付けるため文字列で保持する
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoupleRecord {
    pub id:         CoupleId,
    #[serde(default)]
    pub name1:      Option<String>,
    #[serde(default)]
    pub name2:      Option<String>,
    #[serde(default)]
    pub percentage: Option<Value>,
    pub created_at: String,
}
