/// 存储层登记上传文件
#[derive(Debug, Clone)]
pub struct NewFile {
    pub token: String,
    pub original_name: String,
    pub stored_name: String,
    pub file_size: i64,
    pub file_type: String,
    pub user_id: i64,
}
